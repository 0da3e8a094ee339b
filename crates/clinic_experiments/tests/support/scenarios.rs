use clinic_core::arrivals::ArrivalRateTable;
use clinic_core::scenario::StaffLevels;
use clinic_experiments::ScenarioConfig;

/// Reference end-to-end scenario: 225 patients/day, 10% trauma, the 225/day
/// staffing table.
pub fn reference_225(replications: usize) -> ScenarioConfig {
    ScenarioConfig::stationary(225, 0.10)
        .with_staffing(StaffLevels::new(4, 6, 9, 4, 8))
        .with_replications(replications)
        .with_seed(2024)
}

pub fn ample_capacity(replications: usize) -> ScenarioConfig {
    ScenarioConfig::stationary(75, 0.10)
        .with_staffing(StaffLevels::uniform(500))
        .with_replications(replications)
        .with_seed(7)
}

/// Historical-style table peaking late morning.
pub fn peaked_rates() -> ArrivalRateTable {
    let mut hourly = [8.0; 18];
    for rate in hourly.iter_mut().skip(3).take(5) {
        *rate = 20.0;
    }
    ArrivalRateTable::new(hourly)
}
