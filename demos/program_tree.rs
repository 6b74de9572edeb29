//! Builds a small program tree and prints its time accounting.

use chrono::{TimeZone, Utc};
use gemsched::minimodel::{
    Atom, Group, GroupChildren, GroupOption, ObservationClass, Priority, Program, ProgramMode,
    SetupTimeType, Site, TimeAccountingCode, TimeAllocation, ROOT_GROUP_ID,
};
use gemsched::observatory::gemini::{GeminiProperties, Instrument};
use gemsched::observatory::Observatory;
use gemsched::{GroupID, Observation, ObservationID, ProgramID, ResourceRegistry, ResourceType};
use qtty::{Hours, Second, Seconds};

fn hours(h: f64) -> Seconds {
    Hours::new(h).to::<Second>()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = ResourceRegistry::new();
    let observatory = Observatory::new(GeminiProperties::new(&registry)?);
    let program_id = ProgramID::new("GN-2018B-Q-101");

    let gmos = registry.lookup(Instrument::GmosN.id(), None, Some(ResourceType::Instrument))?;
    let niri = registry.lookup(Instrument::Niri.id(), None, Some(ResourceType::Instrument))?;

    let science = Observation::new(ObservationID::new("GN-2018B-Q-101-1"), Site::GN, &registry)?
        .with_title("Spectroscopy of the target")
        .with_priority(Priority::High)
        .with_setup(SetupTimeType::Full, Seconds::new(960.0))
        .with_sequence(vec![
            Atom::new(0)
                .with_times(hours(0.5), hours(0.5), Seconds::new(0.0))
                .with_resources([gmos.clone()])
                .with_wavelengths([0.65]),
            Atom::new(1)
                .with_times(hours(0.5), hours(0.5), Seconds::new(0.0))
                .with_used(hours(0.5), Seconds::new(0.0), Seconds::new(0.0))
                .with_resources([gmos])
                .with_wavelengths([0.65]),
        ]);

    let telluric = Observation::new(ObservationID::new("GN-2018B-Q-101-2"), Site::GN, &registry)?
        .with_title("Telluric standard")
        .with_obs_class(ObservationClass::Partnercal)
        .with_setup(SetupTimeType::Reacquisition, Seconds::new(300.0))
        .with_sequence(vec![Atom::new(0)
            .with_times(hours(0.25), Seconds::new(0.0), hours(0.25))
            .with_resources([niri])
            .with_wavelengths([2.2])]);

    let nir = telluric.is_nir(&observatory)?;

    let scheduling = Group::new(
        GroupID::new("10"),
        program_id.clone(),
        2,
        GroupChildren::Groups(vec![
            Group::observation_group(science),
            Group::observation_group(telluric),
        ]),
        GroupOption::ConsecOrdered,
    )?
    .with_name("Science with standard");

    let root = Group::new(
        GroupID::new(ROOT_GROUP_ID),
        program_id.clone(),
        1,
        GroupChildren::Groups(vec![scheduling]),
        GroupOption::Anyorder,
    )?;

    let program = Program::new(
        program_id,
        ProgramMode::Queue,
        Utc.with_ymd_and_hms(2018, 8, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2019, 1, 31, 0, 0, 0).unwrap(),
        root,
        vec![TimeAllocation::new(TimeAccountingCode::US, hours(10.0), hours(1.0))],
    )?;

    println!("{program}");
    println!("Time accounting:");
    println!("================");
    println!("  awarded       {:.2} h", program.total_awarded().to::<qtty::Hour>().value());
    println!("  exec time     {:.2} h", program.root_group().exec_time().to::<qtty::Hour>().value());
    println!("  program time  {:.2} h", program.root_group().prog_time().to::<qtty::Hour>().value());
    println!("  partner time  {:.2} h", program.root_group().part_time().to::<qtty::Hour>().value());
    println!("  used          {:.2} h", program.total_used().to::<qtty::Hour>().value());
    println!("  mean priority {:.2}", program.mean_priority());
    println!();

    let index = program.group_index();
    for observation in program.observations() {
        let unique = observation.to_unique_group_id();
        println!(
            "{} '{}' class={:?} depth={:?} parent={:?}",
            observation.id(),
            observation.title(),
            observation.obs_class(),
            index.depth_of(&unique),
            index.parent_of(&unique).map(|p| p.as_str()),
        );
    }
    println!("Telluric standard uses a NIR instrument: {nir}");
    Ok(())
}
