//! Console flow through the ferrydb facade
//!
//! Drives the same sequence the menu system would: set up a vessel and
//! sailings, book and check in vehicles, read the report, delete a sailing.

use ferrydb::{
    FerryDatabase, ReservationCoordinator, SailingCode, StoreConfig, VehicleDetails,
};
use tempfile::TempDir;

fn open() -> (TempDir, ReservationCoordinator) {
    let temp_dir = TempDir::new().unwrap();
    let db = FerryDatabase::open_with_store_config(temp_dir.path(), StoreConfig::for_testing())
        .unwrap();
    (temp_dir, ReservationCoordinator::new(db))
}

#[test]
fn test_console_day() {
    let (_dir, mut coord) = open();
    coord
        .database()
        .create_vessel("Queen of Nanaimo", 40.0, 60.0)
        .unwrap();

    let code = SailingCode::parse("NAN-14-09").unwrap();
    assert_eq!(code.terminal(), "NAN");
    coord
        .database()
        .create_sailing(&code.to_string(), "Queen of Nanaimo")
        .unwrap();
    coord
        .database()
        .create_sailing("NAN-14-17", "Queen of Nanaimo")
        .unwrap();

    coord
        .create_reservation(
            "NAN-14-09",
            "CAR001",
            Some(&VehicleDetails::new("2505550101", 4.0, 1.5)),
        )
        .unwrap();
    coord
        .create_reservation(
            "NAN-14-09",
            "RV002",
            Some(&VehicleDetails::new("2505550102", 12.0, 3.5)),
        )
        .unwrap();

    let checked = coord.check_in("NAN-14-09", "RV002", None).unwrap();
    assert_eq!(checked.fare, 2.0 * 12.0 + 3.0 * 3.5);

    let report = coord.database().sailing_report().unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].vehicles, 2);
    assert_eq!(report[0].low_remaining, 36.0);
    assert_eq!(report[0].high_remaining, 48.0);
    assert_eq!(report[0].percent_remaining, Some(84.0));

    let details = coord.database().sailing_details("NAN-14-09").unwrap();
    let specials = details.reservations.iter().filter(|l| l.is_special()).count();
    assert_eq!(specials, 1);

    assert_eq!(coord.cancel_all_for_sailing("NAN-14-09").unwrap(), 2);
    let remaining: Vec<String> = coord
        .database()
        .sailings()
        .unwrap()
        .map(|s| s.unwrap().sailing_id)
        .collect();
    assert_eq!(remaining, vec!["NAN-14-17"]);
}
