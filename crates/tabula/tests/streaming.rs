//! Streaming output driven through the public API.

use tabula::config::ColumnWidths;
use tabula::render::{Blueprint, BorderStyle};
use tabula::{Config, MergeMode, Streamer, TableError};

fn config(widths: ColumnWidths, columns: usize) -> Config {
    Config::builder()
        .stream_columns(columns)
        .stream_widths(widths)
        .build()
}

fn ascii(config: Config) -> Streamer<Vec<u8>> {
    Streamer::with_renderer(Some(Vec::new()), Blueprint::new(BorderStyle::Ascii), config)
}

fn text(stream: Streamer<Vec<u8>>) -> String {
    String::from_utf8(stream.into_inner().unwrap()).unwrap()
}

#[test]
fn full_stream_in_order() {
    let mut stream = ascii(config(ColumnWidths::global(7), 2));
    stream.start().unwrap();
    stream.header(["id", "name"]).unwrap();
    stream.row(["1", "ana"]).unwrap();
    stream.row(["2", "bo"]).unwrap();
    stream.footer(["", "2 rows"]).unwrap();
    stream.end().unwrap();

    assert_eq!(
        text(stream),
        "+-------+-------+\n\
         |  id   | name  |\n\
         +-------+-------+\n\
         | 1     | ana   |\n\
         | 2     | bo    |\n\
         +-------+-------+\n\
         |       | 2 ro… |\n\
         +-------+-------+\n"
    );
}

#[test]
fn row_before_start_is_an_order_error() {
    let mut stream = ascii(config(ColumnWidths::global(5), 2));
    let err = stream.row(["a", "b"]).unwrap_err();
    assert!(matches!(err, TableError::StreamOrder { op: "row", .. }));
    assert!(text(stream).is_empty());
}

#[test]
fn end_without_rows_closes_the_frame() {
    let mut stream = ascii(config(ColumnWidths::global(4), 3));
    stream.start().unwrap();
    stream.end().unwrap();
    assert_eq!(text(stream), "+----+----+----+\n+----+----+----+\n");
}

#[test]
fn nothing_may_follow_the_footer() {
    let mut stream = ascii(config(ColumnWidths::global(5), 1));
    stream.start().unwrap();
    stream.footer(["f"]).unwrap();
    assert!(matches!(
        stream.row(["r"]).unwrap_err(),
        TableError::StreamOrder { op: "row", .. }
    ));
    assert!(stream.footer(["again"]).is_err());
    stream.end().unwrap();
    assert!(stream.end().is_err());
}

#[test]
fn per_column_widths_and_extra_cells() {
    let widths = ColumnWidths::default().column(0, 4).column(1, 8);
    let mut stream = ascii(config(widths, 0));
    stream.start().unwrap();
    assert_eq!(stream.widths(), &[4, 8]);
    stream.row(["abcdef", "x", "dropped"]).unwrap();
    stream.end().unwrap();

    let output = text(stream);
    assert!(output.contains("| a… | x      |\n"));
    assert!(!output.contains("dropped"));
}

#[test]
fn horizontal_merges_while_streaming() {
    let config = Config::builder()
        .stream_columns(2)
        .stream_widths(ColumnWidths::global(5))
        .row(|r| r.merge(MergeMode::HORIZONTAL | MergeMode::VERTICAL))
        .build();
    let mut stream = ascii(config);
    stream.start().unwrap();
    stream.row(["ab", "ab"]).unwrap();
    stream.row(["ab", "ab"]).unwrap();
    stream.end().unwrap();

    // The top rule is drawn before any row is known.
    assert_eq!(
        text(stream),
        "+-----+-----+\n\
         | ab        |\n\
         | ab        |\n\
         +-----------+\n"
    );
}

#[test]
fn config_without_widths_cannot_start() {
    let mut stream = ascii(Config::default());
    assert!(matches!(stream.start().unwrap_err(), TableError::StreamWidths));
}
