use mfma_emu::format::format_lane_layout;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", format_lane_layout());
    Ok(())
}
