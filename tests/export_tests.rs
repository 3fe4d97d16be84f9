mod common;

use common::{init_env, ok, rtp, snapshot, temp_out};
use predicates::str::contains;
use std::fs;

#[test]
fn test_json_export_reimports_into_another_database() {
    let (home, db) = init_env("export_json_src");
    ok(&home, &db, &["trip", "create", "Tokyo", "--budget", "500000"]);
    ok(&home, &db, &["day", "add", "--date", "2025-04-01"]);
    ok(&home, &db, &["activity", "add", "1", "Shibuya", "--cost", "2000"]);

    let out = temp_out("export_json_src", "json");
    ok(&home, &db, &["export", "--format", "json", "--file", &out])
        .stdout(contains("JSON export completed"));

    let (home2, db2) = init_env("export_json_dst");
    ok(&home2, &db2, &["import", &out]).stdout(contains("Imported 2 trip(s)"));

    let snap = snapshot(&home2, &db2, "export_json_dst");
    let trips = snap["trips"].as_array().unwrap();
    assert_eq!(trips.len(), 3);
    assert_eq!(trips[2]["name"], "Tokyo");
    assert_eq!(trips[2]["totalBudget"], 500000.0);
    assert_eq!(trips[2]["days"][0]["activities"][0]["estimatedCost"], 2000.0);

    // imported trips get their own ids
    let src = snapshot(&home, &db, "export_json_src");
    assert_ne!(src["trips"][1]["id"], trips[2]["id"]);
}

#[test]
fn test_import_legacy_single_trip_file() {
    let (home, db) = init_env("export_legacy");
    let file = temp_out("export_legacy_payload", "json");
    fs::write(
        &file,
        r#"{
            "tripName": "Kyoto",
            "startDate": "2024-11-02",
            "endDate": "2024-11-03",
            "days": [
                { "id": 1, "date": "2024-11-02", "items": [
                    { "id": 10, "name": "Fushimi Inari", "time": "08:00", "type": "attraction", "cost": "50" }
                ] },
                { "id": 2, "date": "2024-11-03", "items": [] }
            ]
        }"#,
    )
    .unwrap();

    ok(&home, &db, &["import", &file]).stdout(contains("active trip is now 'Kyoto'"));
    ok(&home, &db, &["day", "list"]).stdout(contains("₩50"));
}

#[test]
fn test_import_rejects_malformed_payload() {
    let (home, db) = init_env("export_bad_import");
    let file = temp_out("export_bad_import_payload", "json");
    fs::write(&file, r#"{ "version": 5, "days": [] }"#).unwrap();

    rtp(&home)
        .args(["--db", &db, "import", &file])
        .assert()
        .failure()
        .stderr(contains("not a valid trip snapshot"));

    let snap = snapshot(&home, &db, "export_bad_import");
    assert_eq!(snap["trips"].as_array().unwrap().len(), 1);
}

#[test]
fn test_csv_export_lists_expenses() {
    let (home, db) = init_env("export_csv");
    ok(&home, &db, &["owner", "add", "Mina"]);
    ok(&home, &db, &["day", "add", "--date", "2025-07-10"]);
    ok(&home, &db, &["activity", "add", "1", "Palace"]);
    ok(&home, &db, &["expense", "add", "1500", "Ramen", "--day", "1", "--category", "food"]);
    ok(
        &home,
        &db,
        &["expense", "add", "3000", "Ticket", "--day", "1", "--activity", "1", "--owner", "Mina"],
    );

    let out = temp_out("export_csv", "csv");
    ok(&home, &db, &["export", "--format", "csv", "--file", &out]);

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Date,Day,Category,Description,Amount,Currency,Owner");
    assert_eq!(lines[1], "2025-07-10,1,food,Ramen,1500,KRW,Shared");
    assert_eq!(lines[2], "2025-07-10,1,activity,Palace: Ticket,3000,KRW,Mina");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_export_refuses_to_overwrite_without_confirmation() {
    let (home, db) = init_env("export_overwrite");
    let out = temp_out("export_overwrite", "json");
    fs::write(&out, "keep me").unwrap();

    rtp(&home)
        .args(["--db", &db, "export", "--format", "json", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rtp(&home)
        .args(["--db", &db, "export", "--format", "json", "--file", &out])
        .write_stdin("y\n")
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("\"version\": 5"));
}

#[test]
fn test_export_force_overwrites() {
    let (home, db) = init_env("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").unwrap();

    ok(&home, &db, &["export", "--format", "csv", "--file", &out, "-f"]);
    assert!(fs::read_to_string(&out).unwrap().starts_with("Date,Day,Category"));
}
