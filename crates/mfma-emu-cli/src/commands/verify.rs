use mfma_emu::config::LaunchConfig;
use mfma_emu::reference::mfma_reference;
use mfma_emu::ulp::{bitwise_eq, compare_accumulators};
use mfma_emu::Subgroup;

pub fn run(config: &LaunchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ops = config.fixture.init();
    let expected = mfma_reference(&ops.a, &ops.b, &ops.c);

    let mut subgroup = Subgroup::new();
    let mut first = None;
    for i in 0..config.repeat {
        let (got, _) = ops.run_on(&mut subgroup)?;
        compare_accumulators(&got, &expected, 0)?;
        let baseline = *first.get_or_insert(got);
        if !bitwise_eq(&baseline, &got) {
            return Err(format!("launch {} differs bitwise from launch 1", i + 1).into());
        }
    }

    println!(
        "Verified {} launch(es) of fixture '{}' against the scalar reference.",
        config.repeat, config.fixture
    );
    Ok(())
}
