use mec_graph::{parse_graph, read_graph_file, render_graph, write_dag_file, Pdag};

#[test]
fn parses_directed_listing() {
    let text = "3 3\n\n1 2\n2 3\n3 2\n";
    let g = parse_graph(text, false).unwrap();
    assert!(g.is_directed(1, 2));
    assert!(g.is_undirected(2, 3));
}

#[test]
fn undirected_flag_doubles_each_line() {
    let text = "3 2\n\n1 2\n2 3\n";
    let g = parse_graph(text, true).unwrap();
    assert!(g.is_undirected(1, 2));
    assert!(g.is_undirected(2, 3));
    assert_eq!(g.arc_count(), 4);
}

#[test]
fn render_is_lexicographic_and_reparses() {
    let mut g = Pdag::new(4);
    g.add_edge(4, 1).unwrap();
    g.add_edge(1, 3).unwrap();
    g.add_undirected(2, 3).unwrap();
    let text = render_graph(&g);
    assert_eq!(text, "4 5\n\n1 3\n2 3\n3 2\n4 1\n");
    let back = parse_graph(&text, false).unwrap();
    assert_eq!(back, g);
}

#[test]
fn header_and_edge_errors_carry_codes() {
    assert_eq!(
        parse_graph("", false).unwrap_err().info().code,
        "empty-input"
    );
    assert_eq!(
        parse_graph("2 1 9\n\n1 2\n", false).unwrap_err().info().code,
        "bad-header"
    );
    assert_eq!(
        parse_graph("2 1\n1 2\n", false).unwrap_err().info().code,
        "missing-separator"
    );
    assert_eq!(
        parse_graph("2 1\n\n1 x\n", false).unwrap_err().info().code,
        "bad-integer"
    );
    assert_eq!(
        parse_graph("2 2\n\n1 2\n", false).unwrap_err().info().code,
        "edge-count-mismatch"
    );
    let err = parse_graph("2 1\n\n1 1\n", false).unwrap_err();
    assert_eq!(err.info().code, "bad-edge");
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("3"));
}

#[test]
fn file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dag.txt");

    let mut g = Pdag::new(3);
    g.add_edge(1, 2).unwrap();
    g.add_edge(2, 3).unwrap();
    write_dag_file(&path, &g).unwrap();

    let back = read_graph_file(&path, false).unwrap();
    assert_eq!(back, g);

    let missing = dir.path().join("absent.txt");
    assert_eq!(
        read_graph_file(&missing, false).unwrap_err().info().code,
        "read-file"
    );
}
