use qmc_rs::minimize::simplify;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    // The classic 4-variable example: f is true on {4,8,10,11,12,15} and
    // unconstrained on {9,14}.
    let ones = [4, 8, 10, 11, 12, 15];
    let dont_cares = [9, 14];
    println!("ones = {:?}", ones);
    println!("don't-cares = {:?}", dont_cares);

    let terms = simplify(&ones, &dont_cares, Some(4))?;

    println!("minimized to {} terms:", terms.len());
    for term in &terms {
        println!(
            "- {}  literals = {:?}  covers = {:?}  cube size = {}",
            term,
            term.literals(),
            term.covers(),
            term.cube_count(),
        );
    }

    Ok(())
}
