//! End-to-end tests for batch tables: layout geometry and rendered text.

use tabula::layout::Frame;
use tabula::render::{Blueprint, BorderStyle, Rendition};
use tabula::{Align, Config, MergeMode, Padding, Section, Table, WrapMode};

const FRAME: Frame = Frame {
    left: 1,
    right: 1,
    separator: 1,
};

fn render(table: &Table, style: BorderStyle) -> String {
    let mut out = Vec::new();
    table
        .render_with(&Blueprint::new(style), &mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn horizontal_merge_two_by_two() {
    let config = Config::builder()
        .row(|r| r.merge(MergeMode::HORIZONTAL))
        .build();
    let mut table = Table::with_config(config);
    table.append(["A", "A"]).unwrap();
    table.append(["A", "B"]).unwrap();

    let layout = table.layout(FRAME);
    let first = &layout.lines()[0].cells;
    assert!(first[0].merge.horizontal.start);
    assert_eq!(first[0].merge.horizontal.span, 2);
    assert!(first[1].merge.horizontal.end);

    let second = &layout.lines()[1].cells;
    assert!(!second[0].merge.horizontal.present);
    assert!(!second[1].merge.horizontal.present);

    assert_eq!(
        render(&table, BorderStyle::Light),
        "┌───────┐\n\
         │ A     │\n\
         │ A │ B │\n\
         └───┴───┘\n"
    );
}

#[test]
fn horizontal_merge_with_row_lines() {
    let config = Config::builder()
        .row(|r| r.merge(MergeMode::HORIZONTAL))
        .build();
    let mut table = Table::with_config(config);
    table.append(["A", "A"]).unwrap();
    table.append(["A", "B"]).unwrap();

    let mut out = Vec::new();
    let blueprint = Blueprint::new(BorderStyle::Light).rendition(Rendition {
        between_rows: true,
        ..Rendition::default()
    });
    table.render_with(&blueprint, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "┌───────┐\n\
         │ A     │\n\
         ├───┬───┤\n\
         │ A │ B │\n\
         └───┴───┘\n"
    );
}

#[test]
fn vertical_merge_single_column() {
    let config = Config::builder()
        .row(|r| r.merge(MergeMode::VERTICAL))
        .build();
    let mut table = Table::with_config(config);
    table.bulk([["X"], ["X"], ["X"]]).unwrap();

    let layout = table.layout(FRAME);
    let states: Vec<_> = layout
        .lines()
        .iter()
        .map(|line| line.cells[0].merge.vertical)
        .collect();
    assert!(states.iter().all(|s| s.present && s.span == 3));
    assert!(states[0].start);
    assert!(states[2].end);
    let contents: Vec<_> = layout
        .lines()
        .iter()
        .map(|line| line.cells[0].content.as_str())
        .collect();
    assert_eq!(contents, vec!["X", "", ""]);
}

#[test]
fn vertical_merge_hides_row_rules() {
    let config = Config::builder()
        .row(|r| r.merge(MergeMode::VERTICAL))
        .build();
    let mut table = Table::with_config(config);
    table.append(["a", "1"]).unwrap();
    table.append(["a", "2"]).unwrap();

    let blueprint = Blueprint::new(BorderStyle::Ascii).rendition(Rendition {
        between_rows: true,
        ..Rendition::default()
    });
    let mut out = Vec::new();
    table.render_with(&blueprint, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "+---+---+\n\
         | a | 1 |\n\
         |   +---+\n\
         |   | 2 |\n\
         +---+---+\n"
    );
}

#[test]
fn header_truncated_by_table_width() {
    let config = Config::builder()
        .max_width(30)
        .header(|h| h.wrap(WrapMode::Truncate))
        .build();
    let mut table = Table::with_config(config);
    table.header(["Name", "This is a very long header"]).unwrap();
    table.append(["Alice", "ok"]).unwrap();

    let layout = table.layout(FRAME);
    let header: Vec<_> = layout.section(Section::Header).collect();
    assert_eq!(header.len(), 1);
    assert!(header[0].cells[1].content.ends_with('…'));

    let row = layout.section(Section::Row).next().unwrap();
    assert_eq!(row.cells[0].content, "Alice");
    assert_eq!(row.cells[1].content, "ok");
}

#[test]
fn long_cells_wrap_to_several_lines() {
    let config = Config::builder()
        .row(|r| r.column_max_width(1, 12))
        .build();
    let mut table = Table::with_config(config);
    table.append(["1", "the quick brown fox jumps"]).unwrap();

    assert_eq!(
        render(&table, BorderStyle::Ascii),
        "+---+-----------+\n\
         | 1 | the quick |\n\
         |   | brown fox |\n\
         |   | jumps     |\n\
         +---+-----------+\n"
    );
}

#[test]
fn footer_lead_merge_spans_empty_columns() {
    let config = Config::builder()
        .footer(|f| f.merge(MergeMode::HORIZONTAL))
        .build();
    let mut table = Table::with_config(config);
    table.header(["Item", "Qty", "Price"]).unwrap();
    table.append(["apple", "2", "1.50"]).unwrap();
    table.footer(["", "Total", "3.00"]).unwrap();

    let layout = table.layout(FRAME);
    let footer = layout.section(Section::Footer).next().unwrap();
    assert_eq!(footer.cells[0].content, "Total");
    assert_eq!(footer.cells[0].merge.horizontal.span, 2);
    assert!(footer.cells[1].is_hidden());
    assert_eq!(footer.cells[0].width, layout.widths()[0] + layout.widths()[1] + 1);

    let text = render(&table, BorderStyle::Ascii);
    assert!(text.contains("|         Total |  3.00 |\n"));
}

#[test]
fn alignment_per_section_and_column() {
    let config = Config::builder()
        .header(|h| h.align(Align::Left))
        .row(|r| r.column_align(1, Align::Right))
        .build();
    let mut table = Table::with_config(config);
    table.header(["name", "count"]).unwrap();
    table.append(["a", "7"]).unwrap();

    let text = render(&table, BorderStyle::Ascii);
    assert!(text.contains("| name | count |\n"));
    assert!(text.contains("| a    |     7 |\n"));
}

#[test]
fn auto_hide_removes_blank_columns() {
    let config = Config::builder().auto_hide(true).build();
    let mut table = Table::with_config(config);
    table.header(["a", "b", "c"]).unwrap();
    table.append(["1", "", "3"]).unwrap();

    assert_eq!(
        render(&table, BorderStyle::Ascii),
        "+---+---+\n\
         | a | c |\n\
         +---+---+\n\
         | 1 | 3 |\n\
         +---+---+\n"
    );
}

#[test]
fn padding_lines_and_custom_padding() {
    let config = Config::builder()
        .row(|r| r.padding(Padding::new("[", "]").top("~")))
        .build();
    let mut table = Table::with_config(config);
    table.append(["ab"]).unwrap();

    assert_eq!(
        render(&table, BorderStyle::Ascii),
        "+----+\n\
         |~~~~|\n\
         |[ab]|\n\
         +----+\n"
    );
}

#[test]
fn markdown_output() {
    let mut table = Table::new();
    table.header(["k", "v"]).unwrap();
    table.append(["a", "1"]).unwrap();

    assert_eq!(
        render(&table, BorderStyle::Markdown),
        "| k | v |\n\
         |---|---|\n\
         | a | 1 |\n"
    );
}

#[test]
fn borderless_output() {
    let mut table = Table::new();
    table.header(["k", "v"]).unwrap();
    table.append(["a", "1"]).unwrap();

    assert_eq!(render(&table, BorderStyle::None), " k   v \n a   1 \n");
}

#[test]
fn hierarchical_merge_renders_blocks() {
    let config = Config::builder()
        .row(|r| r.merge(MergeMode::HIERARCHICAL))
        .build();
    let mut table = Table::with_config(config);
    table
        .bulk([["1", "a", "x"], ["1", "a", "y"], ["1", "b", "y"]])
        .unwrap();

    let layout = table.layout(FRAME);
    let contents: Vec<Vec<&str>> = layout
        .lines()
        .iter()
        .map(|line| line.cells.iter().map(|c| c.content.as_str()).collect())
        .collect();
    assert_eq!(
        contents,
        vec![vec!["1", "a", "x"], vec!["", "", "y"], vec!["", "b", "y"]]
    );
}

#[test]
fn config_from_json_drives_rendering() {
    let config = Config::from_json(
        r#"{"row": {"align": "right", "padding": {"left": "", "right": ""}}}"#,
    )
    .unwrap();
    let mut table = Table::with_config(config);
    table.append(["a"]).unwrap();
    table.append(["bbb"]).unwrap();

    assert_eq!(
        render(&table, BorderStyle::Ascii),
        "+---+\n\
         |  a|\n\
         |bbb|\n\
         +---+\n"
    );
}

#[test]
fn auto_format_headers() {
    let config = Config::builder()
        .header(|h| h.auto_format(true))
        .build();
    let mut table = Table::with_config(config);
    table.header(["first_name", "lastLogin"]).unwrap();
    let layout = table.layout(FRAME);
    let header = &layout.lines()[0];
    assert_eq!(header.cells[0].content, "First Name");
    assert_eq!(header.cells[1].content, "Last Login");
}

#[test]
fn tightest_max_width_wins() {
    let config = Config::builder()
        .row(|r| {
            r.max_width(10)
                .column_max_width(0, 20)
                .wrap(WrapMode::Truncate)
        })
        .build();
    let mut table = Table::with_config(config);
    table.append(["abcdefghijklmnopqrstuvwxyz"]).unwrap();

    let layout = table.layout(FRAME);
    assert_eq!(layout.widths()[0], 10);
    assert_eq!(layout.lines()[0].cells[0].content, "abcdefg…");
}

#[test]
fn untrimmed_cells_merge_only_when_identical() {
    let config = Config::builder()
        .trim_space(false)
        .row(|r| r.merge(MergeMode::VERTICAL))
        .build();
    let mut table = Table::with_config(config);
    table.bulk([["A  "], ["A"]]).unwrap();

    let layout = table.layout(FRAME);
    let second = &layout.lines()[1].cells[0];
    assert_eq!(second.content, "A");
    assert!(!second.merge.vertical.is_continuation());
}
