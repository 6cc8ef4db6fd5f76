use mfma_emu::config::LaunchConfig;
use mfma_emu::format::{format_a_matrix, format_b_matrix, format_c_matrix};
use mfma_emu::Subgroup;

pub fn run(config: &LaunchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ops = config.fixture.init();

    print!("{}", format_a_matrix("A matrix", &ops.a));
    print!("{}", format_b_matrix("B matrix", &ops.b));
    print!("{}", format_c_matrix("C matrix", &ops.c));

    // Each launch starts from the fixture's C; only the last result is shown.
    let mut subgroup = Subgroup::new();
    let mut result = ops.c;
    for _ in 0..config.repeat {
        let (c, report) = ops.run_on(&mut subgroup)?;
        tracing::info!(
            generation = report.generation,
            elapsed_us = report.elapsed.as_micros(),
            "launch"
        );
        result = c;
    }

    print!("{}", format_c_matrix("Result matrix", &result));
    Ok(())
}
