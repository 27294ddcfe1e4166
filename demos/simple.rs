use linsep::builder::ConstraintIndex;
use linsep::driver::{find_encoding, SearchConfig};
use linsep::symmetry::Symmetries;
use linsep::table::{FnFunction, TruthTable};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config = SearchConfig::default();
    println!("config = {:?}", config);

    let and = TruthTable::from_bools(&[false, false, false, true])?;
    println!("and = {:?}", and);
    let index = ConstraintIndex::build(&and)?;
    println!("constraints:\n{}", index);
    match find_encoding(&and, &Symmetries::none(), &config)? {
        Some(enc) => println!("and: q = {:?} mod {}", enc.coefficients, enc.modulus),
        None => println!("and: no encoding found"),
    }

    let xor = TruthTable::from_bools(&[false, true, true, false])?;
    match find_encoding(&xor, &Symmetries::none(), &config)? {
        Some(enc) => println!("xor: q = {:?} mod {}", enc.coefficients, enc.modulus),
        None => println!("xor: no encoding found"),
    }

    // Majority of three interchangeable inputs.
    let maj = FnFunction::new(3, |v: &[bool]| v.iter().filter(|&&b| b).count() >= 2);
    let sym = Symmetries::new(vec![vec![0, 1, 2]], 3)?;
    match find_encoding(&maj, &sym, &config)? {
        Some(enc) => {
            let residues = enc.verify(&maj)?;
            println!("maj: q = {:?} mod {}", enc.coefficients, enc.modulus);
            println!("maj: false -> {:?}", residues.false_residues);
            println!("maj: true -> {:?}", residues.true_residues);
        }
        None => println!("maj: no encoding found"),
    }

    Ok(())
}
