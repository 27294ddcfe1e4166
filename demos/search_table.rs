use std::path::PathBuf;

use clap::Parser;

use linsep::artifact::TableArtifact;
use linsep::driver::SearchConfig;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Table files to search.
    #[arg(value_name = "FILE", required = true)]
    tables: Vec<PathBuf>,

    /// Smallest modulus to try.
    #[clap(long, value_name = "INT", default_value = "2")]
    p_min: u32,

    /// Largest modulus to try.
    #[clap(long, value_name = "INT", default_value = "31")]
    p_max: u32,

    /// Search all admissible primes in parallel.
    #[clap(long)]
    parallel: bool,

    /// Print the constraint matrix of each table.
    #[clap(long)]
    constraints: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let config = SearchConfig {
        p_min: args.p_min,
        p_max: args.p_max,
        parallel: args.parallel,
    };

    for path in &args.tables {
        println!("----------------------------------");
        println!("path: {}", path.display());
        let artifact = TableArtifact::load(path)?;
        println!(
            "leaves: {}, true outputs: {}, symmetries: {:?}",
            artifact.leaves().len(),
            artifact.table().count_ones(),
            artifact.symmetries().chains()
        );

        if args.constraints {
            let index = linsep::builder::ConstraintIndex::build(artifact.table())?;
            println!("{} constraints:\n{}", index.total(), index);
        }

        let time = std::time::Instant::now();
        match artifact.search_verified(&config)? {
            Some(enc) => {
                println!("p = {}", enc.modulus);
                for (leaf, q) in &enc.assignment {
                    println!("- {} = {}", leaf, q);
                }
            }
            None => println!("no encoding found for p in [{}, {}]", config.p_min, config.p_max),
        }
        println!("searched in {:.3} s", time.elapsed().as_secs_f64());
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
