use dbf_core::error::DbfError;
use dbf_core::source::InMemSource;
use dbf_core::write::tabular::split_line;
use dbf_core::{MergeOptions, Table, TabularWriter, convert::write_table, merge};

/// Lay out a level 5 table byte by byte: (name, tag, len) per field, raw
/// field bytes per record.
fn table_bytes(fields: &[(&str, u8, u8)], records: &[&[&[u8]]]) -> Vec<u8> {
    let header_len = 32 + 32 * fields.len() + 1;
    let record_len = 1 + fields.iter().map(|f| f.2 as usize).sum::<usize>();

    let mut buf = vec![0u8; 32];
    buf[0] = 0x03;
    buf[1] = 124;
    buf[2] = 3;
    buf[3] = 9;
    buf[4..8].copy_from_slice(&(records.len() as u32).to_le_bytes());
    buf[8..10].copy_from_slice(&(header_len as u16).to_le_bytes());
    buf[10..12].copy_from_slice(&(record_len as u16).to_le_bytes());
    for (name, tag, len) in fields {
        let mut d = [0u8; 32];
        d[..name.len()].copy_from_slice(name.as_bytes());
        d[11] = *tag;
        d[16] = *len;
        buf.extend_from_slice(&d);
    }
    buf.push(0x0d);
    assert_eq!(buf.len(), header_len);
    for rec in records {
        buf.push(b' ');
        for cell in *rec {
            buf.extend_from_slice(cell);
        }
    }
    buf
}

fn render(buf: &[u8]) -> Result<String, DbfError> {
    let table = Table::parse(buf)?;
    let mut w = TabularWriter::new(Vec::new());
    write_table(&table, &mut w)?;
    Ok(String::from_utf8(w.into_inner()).unwrap())
}

fn three_fields() -> Vec<u8> {
    table_bytes(
        &[("ID", b'N', 4), ("NAME", b'C', 10), ("BORN", b'D', 10)],
        &[&[b"  12", b"Alice     ", b"2024-01-01"]],
    )
}

#[test]
fn three_field_record_decodes_to_trimmed_cells() {
    let buf = three_fields();
    let table = Table::parse(&buf).unwrap();
    assert_eq!(table.header().header_len, 129);
    assert_eq!(table.header().field_count, 3);

    let cells: Vec<String> = table
        .records()
        .next()
        .unwrap()
        .cells()
        .map(|c| c.into_owned())
        .collect();
    assert_eq!(cells, ["12", "Alice", "2024-01-01"]);
    assert_eq!(render(&buf).unwrap(), "ID;NAME;BORN\n12;Alice;2024-01-01\n");
}

#[test]
fn field_count_matches_descriptors_before_terminator() {
    let buf = three_fields();
    let table = Table::parse(&buf).unwrap();
    let n = table.fields().len();
    assert_eq!(n, table.header().field_count);
    assert_eq!(buf[32 + 32 * n], 0x0d);
}

#[test]
fn field_offsets_are_prefix_sums() {
    let buf = three_fields();
    let table = Table::parse(&buf).unwrap();
    let mut expect = 1;
    for (span, f) in table.field_spans().iter().zip(table.fields()) {
        assert_eq!(span.start, expect);
        expect += f.length as usize;
        assert_eq!(span.end, expect);
    }
    assert!(expect <= table.header().record_len as usize);
}

#[test]
fn text_round_trip() {
    let buf = table_bytes(
        &[("A", b'C', 3), ("B", b'C', 3)],
        &[&[b"x  ", b"  y"], &[b"   ", b"zzz"]],
    );
    let text = render(&buf).unwrap();
    let table = Table::parse(&buf).unwrap();
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    assert_eq!(split_line(lines[0]), table.field_names().collect::<Vec<_>>());
    for (line, rec) in lines[1..].iter().zip(table.records()) {
        let cells: Vec<String> = rec.cells().map(|c| c.into_owned()).collect();
        assert_eq!(split_line(line), cells);
    }
}

#[test]
fn decoding_twice_is_identical() {
    let buf = three_fields();
    assert_eq!(render(&buf).unwrap(), render(&buf).unwrap());
}

#[test]
fn zero_records_yield_only_header() {
    let buf = table_bytes(&[("ID", b'N', 4)], &[]);
    assert_eq!(render(&buf).unwrap(), "ID\n");
}

#[test]
fn overlong_geometry_fails_before_any_line() {
    let mut buf = three_fields();
    // claim a second record that is not there
    buf[4..8].copy_from_slice(&2u32.to_le_bytes());
    let mut w = TabularWriter::new(Vec::new());
    let res = Table::parse(&buf).and_then(|t| write_table(&t, &mut w));
    assert!(matches!(
        res,
        Err(DbfError::RecordOutOfBounds {
            needed: 179,
            available: 154
        })
    ));
    assert!(w.into_inner().is_empty());
}

#[test]
fn merge_two_files_with_source_names() {
    let mut src = InMemSource::new();
    src.insert("first.dbf", three_fields());
    src.insert(
        "second.dbf",
        table_bytes(
            &[("ID", b'N', 4), ("NAME", b'C', 10), ("BORN", b'D', 10)],
            &[
                &[b"   7", b"Bob       ", b"1999-12-31"],
                &[b"   8", b"Eve       ", b"2000-02-29"],
            ],
        ),
    );
    let mut w = TabularWriter::new(Vec::new());
    let summary = merge(&src, &mut w, &MergeOptions::default()).unwrap();
    let text = String::from_utf8(w.into_inner()).unwrap();
    assert_eq!(
        text,
        "FROM_FILE;ID;NAME;BORN\n\
         first.dbf;12;Alice;2024-01-01\n\
         second.dbf;7;Bob;1999-12-31\n\
         second.dbf;8;Eve;2000-02-29\n"
    );
    assert_eq!(text.matches("FROM_FILE").count(), 1);
    assert_eq!(summary.records, 3);
}
