// tests/config.rs
use anyhow::Result;
use retail_etl::{EtlConfig, EtlError, LabelDate};
use std::io::Write;

#[test]
fn defaults_match_extract_conventions() -> Result<()> {
    let cfg = EtlConfig::default();
    assert_eq!(cfg.address_separator, " – ");
    assert_eq!(cfg.numeric_default, 0.0);
    assert_eq!(cfg.cosmos_fact_label, LabelDate::trailing());
    assert_eq!(cfg.cosmos_master_label, LabelDate::leading());
    assert_eq!(cfg.galaxy_label, LabelDate::timestamped());
    assert_eq!(EtlConfig::from_toml_str("")?, cfg);
    Ok(())
}

#[test]
fn partial_override_keeps_other_defaults() -> Result<()> {
    let cfg = EtlConfig::from_toml_str("address_separator = \" | \"\nnumeric_default = -1.0\n")?;
    assert_eq!(cfg.address_separator, " | ");
    assert_eq!(cfg.numeric_default, -1.0);
    assert_eq!(cfg.galaxy_label, LabelDate::timestamped());
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> Result<()> {
    let err = EtlConfig::from_toml_str("adress_separator = \"/\"").unwrap_err();
    assert!(matches!(err, EtlError::Config(_)));
    Ok(())
}

#[test]
fn load_from_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "[galaxy_label]\nseparator = \"_\"\nyear = 0\nmonth = 1\nday = 2")?;

    let cfg = EtlConfig::load_path(file.path())?;
    assert_eq!(cfg.galaxy_label, LabelDate { separator: '_', year: 0, month: 1, day: 2 });
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let err = EtlConfig::load_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, EtlError::Io(_)));
    Ok(())
}
