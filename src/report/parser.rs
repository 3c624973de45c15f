//! Parsers for the two report inputs: a Pfam-layout Stockholm alignment
//! and an Infernal `outlist` table of per-hit bit scores.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid Stockholm header")]
    InvalidHeader,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of file")]
    UnexpectedEof,
}

/// Raw parse result: sequences in file order plus the structural
/// annotation lines the report displays above them.
#[derive(Debug, Default)]
pub struct ReportAlignment {
    pub ss_cons: Option<String>,
    pub rf: Option<String>,
    /// `(id, aligned sequence)` pairs in file order.
    pub sequences: Vec<(String, String)>,
}

/// Parse a Stockholm alignment, keeping only what the report renders:
/// the `SS_cons` and `RF` column annotations and the sequences.
///
/// Blocked (interleaved) files are supported by accumulating data per
/// id across blocks.
pub fn parse_alignment<R: Read>(reader: R) -> Result<ReportAlignment, ParseError> {
    let buf_reader = BufReader::new(reader);
    let mut lines = buf_reader.lines();

    let header = lines.next().ok_or(ParseError::UnexpectedEof)??;
    if !header.starts_with("# STOCKHOLM") {
        return Err(ParseError::InvalidHeader);
    }

    let mut ss_cons = String::new();
    let mut rf = String::new();
    let mut seq_data: HashMap<String, String> = HashMap::new();
    let mut seq_order: Vec<String> = Vec::new();

    for line_result in lines {
        let line = line_result?;

        if line.is_empty() {
            continue;
        }
        if line.starts_with("//") {
            break;
        }

        if let Some(rest) = line.strip_prefix("#=GC") {
            let parts: Vec<&str> = rest.trim().splitn(2, char::is_whitespace).collect();
            if parts.len() == 2 {
                match parts[0] {
                    "SS_cons" => ss_cons.push_str(parts[1].trim()),
                    "RF" => rf.push_str(parts[1].trim()),
                    _ => {}
                }
            }
            continue;
        }

        // Other annotations and comments are not rendered by the report.
        if line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
        if parts.len() == 2 {
            let id = parts[0].to_string();
            let data = parts[1].trim().replace(' ', "");
            if !seq_data.contains_key(&id) {
                seq_order.push(id.clone());
            }
            seq_data
                .entry(id)
                .and_modify(|s| s.push_str(&data))
                .or_insert(data);
        }
    }

    let sequences = seq_order
        .into_iter()
        .filter_map(|id| seq_data.remove(&id).map(|data| (id, data)))
        .collect();

    Ok(ReportAlignment {
        ss_cons: (!ss_cons.is_empty()).then_some(ss_cons),
        rf: (!rf.is_empty()).then_some(rf),
        sequences,
    })
}

/// Parse an `outlist` table into a name -> bit-score map.
///
/// Columns are whitespace separated: `bits evalue seqLabel name overlap
/// start end ...`. Comment lines and FULL-SEED rows are skipped; a row
/// with an unparseable bits field gets no entry, so the matching
/// sequence stays unscored (always visible, never counted by the row
/// filter).
pub fn parse_outlist<R: Read>(reader: R) -> Result<HashMap<String, f64>, ParseError> {
    let buf_reader = BufReader::new(reader);
    let mut scores = HashMap::new();

    for line_result in buf_reader.lines() {
        let line = line_result?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 7 {
            continue;
        }
        if fields[2] == "FULL-SEED" {
            continue;
        }
        if let Ok(bits) = fields[0].parse::<f64>() {
            let key = outlist_seq_name(fields[3], fields[5], fields[6]);
            scores.entry(key).or_insert(bits);
        }
    }

    Ok(scores)
}

/// Join key for an outlist hit.
///
/// Alignment rows are named `accession/start-end`, but non-URS outlist
/// hits carry a bare accession in the name column, so the key is
/// composed from the start/end columns unless the name already carries
/// a coordinate suffix. URS accessions are used as-is.
fn outlist_seq_name(name: &str, start: &str, end: &str) -> String {
    if name.starts_with("URS00") || has_coordinate_suffix(name) {
        name.to_string()
    } else {
        format!("{name}/{start}-{end}")
    }
}

/// True for names of the form `.../<digits>-<digits>`.
fn has_coordinate_suffix(name: &str) -> bool {
    name.rsplit_once('/')
        .and_then(|(_, coords)| coords.split_once('-'))
        .is_some_and(|(start, end)| {
            !start.is_empty()
                && !end.is_empty()
                && start.bytes().all(|b| b.is_ascii_digit())
                && end.bytes().all(|b| b.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_ALIGNMENT: &str = r#"# STOCKHOLM 1.0
#=GF AC RF00001
seq1/1-10    ACGU..ACGU
seq2/1-10    ACGU..ACGU
#=GC SS_cons <<<<..>>>>
#=GC RF      xxxx..xxxx
//
"#;

    #[test]
    fn test_parse_simple() {
        let alignment = parse_alignment(SIMPLE_ALIGNMENT.as_bytes()).unwrap();
        assert_eq!(alignment.sequences.len(), 2);
        assert_eq!(alignment.sequences[0].0, "seq1/1-10");
        assert_eq!(alignment.sequences[0].1, "ACGU..ACGU");
        assert_eq!(alignment.ss_cons.as_deref(), Some("<<<<..>>>>"));
        assert_eq!(alignment.rf.as_deref(), Some("xxxx..xxxx"));
    }

    const BLOCKED_ALIGNMENT: &str = r#"# STOCKHOLM 1.0
seq1    ACGU
seq2    ACGU
#=GC SS_cons <<>>

seq1    ACGU
seq2    ACGU
#=GC SS_cons <<>>
//
"#;

    #[test]
    fn test_parse_blocked() {
        let alignment = parse_alignment(BLOCKED_ALIGNMENT.as_bytes()).unwrap();
        assert_eq!(alignment.sequences.len(), 2);
        assert_eq!(alignment.sequences[0].1, "ACGUACGU");
        assert_eq!(alignment.ss_cons.as_deref(), Some("<<>><<>>"));
    }

    #[test]
    fn test_invalid_header() {
        let result = parse_alignment("not a stockholm file\n//\n".as_bytes());
        assert!(matches!(result, Err(ParseError::InvalidHeader)));
    }

    const OUTLIST: &str = "\
# bits  evalue   seqLabel  name       overlap  start  end
105.9   1.5e-20  FULL      seq1/1-10        -      1   10  +
 25.1   3.2e-04  FULL      seq2/1-10        -      1   10  +
  n/a   -        SEED      seq3/1-10        -      1   10  +
";

    #[test]
    fn test_parse_outlist() {
        let scores = parse_outlist(OUTLIST.as_bytes()).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.get("seq1/1-10"), Some(&105.9));
        assert_eq!(scores.get("seq2/1-10"), Some(&25.1));
        assert_eq!(scores.get("seq3/1-10"), None);
    }

    #[test]
    fn test_bare_accession_gets_coordinate_suffix() {
        // Genomic hits name a bare accession in the outlist while the
        // alignment row is accession/start-end; the key must match the
        // alignment naming.
        let line = "98.3  1.1e-17  FULL  CM000306.1  -  15357359  15357425  \
                    +  1  67  no  Macaca_mulatta_(Rhesus_..[9544]  \
                    GA:A;RV:A;SO:N[0.000]  Macaca mulatta chromosome 20\n";
        let scores = parse_outlist(line.as_bytes()).unwrap();
        assert_eq!(scores.get("CM000306.1/15357359-15357425"), Some(&98.3));
        assert_eq!(scores.get("CM000306.1"), None);
    }

    #[test]
    fn test_urs_accession_used_as_is() {
        let line = "55.0  1.0e-09  FULL  URS00003A1C2B_9606  -  15  80  +\n";
        let scores = parse_outlist(line.as_bytes()).unwrap();
        assert_eq!(scores.get("URS00003A1C2B_9606"), Some(&55.0));
    }

    #[test]
    fn test_full_seed_rows_skipped() {
        let line = "98.0  1.0e-10  FULL-SEED  AB012345.1  -  1  67  +\n";
        let scores = parse_outlist(line.as_bytes()).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_outlist_first_entry_wins() {
        let dup = "30.0 1e-5 FULL seqA - 1 10 +\n20.0 1e-3 FULL seqA - 1 10 +\n";
        let scores = parse_outlist(dup.as_bytes()).unwrap();
        assert_eq!(scores.get("seqA/1-10"), Some(&30.0));
    }

    #[test]
    fn test_coordinate_suffix_detection() {
        assert!(has_coordinate_suffix("CM000306.1/15357359-15357425"));
        assert!(!has_coordinate_suffix("CM000306.1"));
        assert!(!has_coordinate_suffix("name/abc-def"));
        assert!(!has_coordinate_suffix("name/15-"));
    }
}
