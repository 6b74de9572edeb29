//! Sunset, twilight and moon times for both Gemini sites over a few nights.

use chrono::{Duration, TimeZone, Utc};
use gemsched::minimodel::ALL_SITES;
use gemsched::sky::{night_events, Sun};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let first = Utc.with_ymd_and_hms(2020, 7, 1, 9, 25, 0).unwrap();
    let times: Vec<_> = (0..3).map(|d| first + Duration::days(d)).collect();

    for site in ALL_SITES {
        let offset = site
            .utc_offset()
            .ok_or("site has no valid UTC offset")?;
        let location = site.location();
        let nights = night_events(&times, &location, offset)?;

        println!("{} ({})", site.site_name(), site.resource_id());
        println!("==========================");
        for night in &nights {
            let sun = Sun::at(night.midnight.into());
            println!("Night of local midnight {} UTC", night.midnight.format("%Y-%m-%d %H:%M"));
            println!("  sunset            {}", night.sunset.format("%H:%M:%S"));
            println!("  evening 12° twi   {}", night.evening_twilight.format("%H:%M:%S"));
            println!("  morning 12° twi   {}", night.morning_twilight.format("%H:%M:%S"));
            println!("  sunrise           {}", night.sunrise.format("%H:%M:%S"));
            println!("  moonrise          {}", night.moonrise.format("%m-%d %H:%M:%S"));
            println!("  moonset           {}", night.moonset.format("%m-%d %H:%M:%S"));
            println!(
                "  Sun at midnight   RA {:.3}°, Dec {:.3}°",
                sun.ra.value(),
                sun.dec.value()
            );
        }
        println!();
    }
    Ok(())
}
