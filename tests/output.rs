use heatpump_json::output::{Args, Format};
use heatpump_json::{BuildTree, Config, Serializer, Settings, Status};

fn cooling() -> Settings {
    Settings {
        power: "ON".into(),
        mode: "COOL".into(),
        temperature: 24.0,
        fan: "QUIET".into(),
        vane: "SWING".into(),
        wide_vane: "<>".into(),
    }
}

fn write(format: Format, serializer: Serializer, tree: &heatpump_json::Tree) -> String {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("record.out");
    let mut output = Args::new(Some(path.clone()), format).to_output().unwrap();
    output.record(&serializer, tree).unwrap();
    output.commit().unwrap();
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn json_line() {
    let status = Status {
        room_temperature: 19.5,
        operating: false,
        compressor_frequency: 0,
    };
    let written = write(Format::Json, Serializer::default(), &status.build_tree());
    assert_eq!(
        written,
        "{\"room_temperature_c\":19.5,\"is_operating\":false,\"compressor_frequency\":0}\n"
    );
}

#[test]
fn csv_rows() {
    let written = write(Format::Csv, Serializer::default(), &cooling().build_tree());
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("power,mode,temperature_c,fan,vane,wide_vane"));
    assert_eq!(lines.next(), Some("ON,COOL,24.0,QUIET,SWING,<>"));
    assert_eq!(lines.next(), None);
}

#[test]
fn table_lists_every_entry() {
    let written = write(Format::Table, Serializer::default(), &cooling().build_tree());
    for needle in ["Key", "Value", "temperature_c", "24.0", "wide_vane", "<>"] {
        assert!(written.contains(needle), "{needle} missing from:\n{written}");
    }
}

#[test]
fn json_respects_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("record.out");
    let mut output = Args::new(Some(path), Format::Json).to_output().unwrap();
    let serializer = Serializer::new(Config { max_size: 8 });
    let err = output.record(&serializer, &cooling().build_tree()).unwrap_err();
    assert!(matches!(err, heatpump_json::output::Error::Encode(_)));
}

#[test]
fn truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("record.out");
    std::fs::write(&path, "x".repeat(4096)).unwrap();
    let mut output = Args::new(Some(path.clone()), Format::Json).to_output().unwrap();
    output.record(&Serializer::default(), &cooling().build_tree()).unwrap();
    output.commit().unwrap();
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.starts_with("{\"power\":\"ON\""));
    assert!(!written.contains("xxx"));
}

#[test]
fn csv_and_table_respect_limit() {
    let serializer = Serializer::new(Config { max_size: 8 });
    for format in [Format::Csv, Format::Table] {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.out");
        let mut output = Args::new(Some(path.clone()), format).to_output().unwrap();
        let err = output.record(&serializer, &cooling().build_tree()).unwrap_err();
        assert!(matches!(
            err,
            heatpump_json::output::Error::Encode(heatpump_json::Error::TooLarge {
                max_size: 8,
                ..
            })
        ));
        drop(output);
        assert!(std::fs::read_to_string(path).unwrap().is_empty());
    }
}
