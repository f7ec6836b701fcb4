use kvmdeps::core::DependencyAnalyzer;
use kvmdeps::formatters::TextReportFormatter;
use kvmdeps::DependencyIndex;
use std::fs;

#[test]
fn text_report_lists_both_sections_in_order() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("orders")).unwrap();
    fs::create_dir_all(dir.path().join("billing")).unwrap();
    fs::write(dir.path().join("billing/a.xml"), "rates and config").unwrap();
    fs::write(dir.path().join("orders/a.xml"), "config").unwrap();

    let index = DependencyAnalyzer::new()
        .find_dependencies(r#"["config", "rates", "unused"]"#, dir.path())
        .unwrap();
    let report = TextReportFormatter::new().format(&index).unwrap();

    let expected = "\
Forward Dependencies (Proxy --> KVMs):
billing: config, rates
orders: config

Reverse Dependencies (KVM --> Proxies):
config: billing, orders
rates: billing
unused: 
";
    assert_eq!(report, expected);
}

#[test]
fn empty_index_still_prints_headers() {
    let report = TextReportFormatter::new()
        .format(&DependencyIndex::empty())
        .unwrap();
    assert_eq!(
        report,
        "Forward Dependencies (Proxy --> KVMs):\n\nReverse Dependencies (KVM --> Proxies):\n"
    );
}

#[test]
fn text_report_writes_to_file() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    TextReportFormatter::new()
        .format_to_file(&DependencyIndex::empty(), tmp.path())
        .unwrap();
    let s = fs::read_to_string(tmp.path()).unwrap();
    assert!(s.starts_with("Forward Dependencies"));
}
