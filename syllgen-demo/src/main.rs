use syllgen_core::{GenerateOptions, Generator, NameGenError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load every base of the "data" directory (.dat files)
    // A .bin snapshot is written next to each file and reused on the next run
    let mut app = Generator::new();
    for base in app.load_folder("./data")? {
        println!("Loaded base '{}'", base);
    }

    // Options for the celtic base: names of 4 to 12 letters,
    // where "nn", "dd" and "ll" are collapsed to a single letter
    let celtic = GenerateOptions::new("celtic_wb", 4, 12)?.with_no_duplicates("ndl");

    // Min length greater than max length is rejected
    match GenerateOptions::new("celtic_wb", 12, 4) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Invalid bounds: {}", e),
    }

    // A base that is neither cached nor given example words can not be generated
    let unknown = GenerateOptions::new("unknown", 4, 12)?;
    match app.generate(&unknown) {
        Err(NameGenError::EmptyBase(base)) => println!("Base '{}' has no example words", base),
        other => println!("Should not happen: {:?}", other),
    }

    // A base can also be learned from words in memory
    app.update_chain("latin", &["Roma", "Ostia", "Capua", "Neapolis", "Mediolanum", "Aquileia", "Ravenna"])?;
    let latin = GenerateOptions::new("latin", 4, 10)?;

    // Generate 10 words for each base
    for (label, options) in [("celtic", &celtic), ("latin", &latin)] {
        for i in 0..10 {
            match app.generate(options) {
                Ok(name) => println!("Generated {} word {}: {}", label, i + 1, name),
                Err(e) => println!("Generation failed: {}", e),
            }
        }
    }

    Ok(())
}
