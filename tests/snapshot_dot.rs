use kvmdeps::core::{
    build_graph, DependencyIndex, FileContent, GraphDirection, KeyList, ScanEvent, ScannedFile,
};
use kvmdeps::formatters::{DotFormatter, Layout};
use std::path::PathBuf;

fn index() -> DependencyIndex {
    let keys = KeyList::new(["rates", "config"]);
    DependencyIndex::from_events(
        &keys,
        vec![
            Ok(ScanEvent::Proxy("orders".to_string())),
            Ok(ScanEvent::File(ScannedFile {
                proxy: "orders".to_string(),
                path: PathBuf::from("orders/a.xml"),
                content: FileContent::Text("rates rates".to_string()),
            })),
        ],
    )
    .unwrap()
}

#[test]
fn dot_snapshot_forward() {
    let graph = build_graph(&index(), GraphDirection::Forward);
    let dot = DotFormatter::new().format(&graph).unwrap();

    let expected = r#"digraph "kvm_dependencies" {
    layout=fdp;
    overlap=false;
    node [fontname="Helvetica"];
    n0 [label="orders", shape=box];
    n1 [label="rates", shape=ellipse];
    n0 -> n1 [label="2"];
}
"#;
    assert_eq!(dot, expected);
}

#[test]
fn dot_reverse_uses_requested_layout() {
    let graph = build_graph(&index(), GraphDirection::Reverse);
    let tmp = tempfile::NamedTempFile::new().unwrap();
    DotFormatter::new()
        .with_layout(Layout::Sfdp)
        .with_name("kvm_to_proxy")
        .format_to_file(&graph, tmp.path())
        .unwrap();
    let dot = std::fs::read_to_string(tmp.path()).unwrap();

    assert!(dot.starts_with("digraph \"kvm_to_proxy\" {"));
    assert!(dot.contains("layout=sfdp;"));
    assert!(dot.contains("[label=\"config\", shape=ellipse];"));
    assert!(dot.contains("n0 -> n1 [label=\"2\"];"));
}
