use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};

use super::{
    dataset::{Attribute, AttributeKind, Dataset},
    record::Record,
    value::Value,
};
use crate::constants::{MISSING_TOKEN, MISSING_VALUE};
use crate::error::{Id3Error, Result};


/// A struct that returns [`Dataset`].
/// Using this struct, one can read an ARFF/CSV format file to [`Dataset`].
/// The format is chosen by the file extension.
/// # Example
/// The following code reads the ARFF file of the lab.
/// ```no_run
/// use id3tree::DatasetReader;
/// let dataset = DatasetReader::new()
///     .file("Autism-Adult-Data.arff")
///     .read()
///     .unwrap();
/// ```
pub struct DatasetReader<P> {
    file: Option<P>,
    has_header: bool,
}


impl<P> DatasetReader<P> {
    /// Construct a new instance of [`DatasetReader`].
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: true,
        }
    }


    /// Set the flag whether a CSV file has the header row or not.
    /// Default is `true.` Ignored for ARFF files.
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}


impl<P> Default for DatasetReader<P> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P> DatasetReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file based on the arguments.
    /// Files with the extension `.arff` are parsed as ARFF,
    /// everything else as CSV.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Dataset> {
        let file = self.file
            .expect("The file name for arff/csv is not set");
        let path = file.as_ref();

        let reader = BufReader::new(File::open(path)?);
        if path.extension().is_some_and(|ext| ext == "arff") {
            read_arff(reader)
        } else {
            read_csv(reader, self.has_header)
        }
    }
}


/// Parse an ARFF stream.
/// Supported: `@relation`, `@attribute` with `numeric`/`real`/`integer`,
/// nominal `{...}`, `string` and `date` types, dense `@data` rows,
/// `%` comments and `?` for missing entries.
pub fn read_arff<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut attributes = Vec::new();
    let mut in_data = false;
    let mut dataset: Option<Dataset> = None;

    for (k, line) in reader.lines().enumerate() {
        let line_no = k + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') { continue; }

        if !in_data {
            let lower = line.to_ascii_lowercase();
            if lower.starts_with("@relation") {
                continue;
            } else if lower.starts_with("@attribute") {
                let attr = parse_attribute(&line["@attribute".len()..])
                    .map_err(|reason| Id3Error::Parse { line: line_no, reason })?;
                attributes.push(attr);
            } else if lower.starts_with("@data") {
                in_data = true;
                dataset = Some(Dataset::new(std::mem::take(&mut attributes)));
            } else {
                let reason = format!("unexpected header line `{line}`");
                return Err(Id3Error::Parse { line: line_no, reason });
            }
            continue;
        }

        if line.starts_with('{') {
            let reason = "sparse ARFF rows are not supported".to_string();
            return Err(Id3Error::Parse { line: line_no, reason });
        }

        let Some(data) = dataset.as_mut() else { unreachable!() };
        let tokens = split_quoted(line, ',');
        if tokens.len() != data.attributes().len() {
            let reason = format!(
                "expected {} values, got {}",
                data.attributes().len(),
                tokens.len(),
            );
            return Err(Id3Error::Parse { line: line_no, reason });
        }

        let record = data.attributes()
            .iter()
            .zip(tokens)
            .map(|(attr, token)| {
                parse_value(&token, attr.kind)
                    .map(|value| (attr.name.clone(), value))
            })
            .collect::<std::result::Result<Record, _>>()
            .map_err(|reason| Id3Error::Parse { line: line_no, reason })?;
        data.push(record)?;
    }

    dataset.ok_or_else(|| {
        let reason = "the `@data` section is missing".to_string();
        Id3Error::Parse { line: 0, reason }
    })
}


/// Parse a CSV stream.
/// Every column whose non-missing entries all parse as `f64`
/// becomes numeric; other columns are nominal.
/// Without a header, the columns are named `Attr. [1]`, `Attr. [2]`, ...
pub fn read_csv<R: BufRead>(reader: R, has_header: bool) -> Result<Dataset> {
    let mut names: Option<Vec<String>> = None;
    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();

    for (k, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let tokens = split_quoted(&line, ',');

        if names.is_none() {
            if has_header {
                names = Some(tokens);
                continue;
            }
            let n_attribute = tokens.len();
            names = Some(
                (1..=n_attribute).map(|i| format!("Attr. [{i}]")).collect()
            );
        }
        let n_attribute = names.as_ref().map_or(0, |names| names.len());
        if tokens.len() != n_attribute {
            let reason = format!(
                "expected {n_attribute} values, got {}", tokens.len()
            );
            return Err(Id3Error::Parse { line: k + 1, reason });
        }
        rows.push((k + 1, tokens));
    }

    let Some(names) = names else { return Ok(Dataset::default()); };
    let attributes = names.into_iter()
        .enumerate()
        .map(|(j, name)| {
            let numeric = rows.iter()
                .map(|(_, row)| row[j].as_str())
                .filter(|token| !is_missing_token(token))
                .all(|token| token.parse::<f64>().is_ok());
            let kind = if numeric && !rows.is_empty() {
                AttributeKind::Numeric
            } else {
                AttributeKind::Nominal
            };
            Attribute::new(name, kind)
        })
        .collect::<Vec<_>>();

    let mut dataset = Dataset::new(attributes.clone());
    for (line, row) in rows {
        let record = attributes.iter()
            .zip(row)
            .map(|(attr, token)| {
                parse_value(&token, attr.kind)
                    .map(|value| (attr.name.clone(), value))
            })
            .collect::<std::result::Result<Record, _>>()
            .map_err(|reason| Id3Error::Parse { line, reason })?;
        dataset.push(record)?;
    }
    Ok(dataset)
}


fn is_missing_token(token: &str) -> bool {
    token.is_empty() || token == MISSING_TOKEN || token == MISSING_VALUE
}


fn parse_value(token: &str, kind: AttributeKind)
    -> std::result::Result<Value, String>
{
    if is_missing_token(token) { return Ok(Value::missing()); }
    match kind {
        AttributeKind::Numeric => {
            token.parse::<f64>()
                .map(Value::Numeric)
                .map_err(|_| format!("`{token}` is not a number"))
        },
        AttributeKind::Nominal => Ok(Value::from(token)),
    }
}


/// Parse the part of an `@attribute` line that follows the keyword.
fn parse_attribute(rest: &str) -> std::result::Result<Attribute, String> {
    let rest = rest.trim();
    let (name, decl) = match rest.chars().next() {
        Some(q @ ('\'' | '"')) => {
            let end = rest[1..].find(q)
                .ok_or_else(|| format!("unterminated name in `{rest}`"))?;
            (rest[1..=end].to_string(), rest[end + 2..].trim())
        },
        Some(_) => {
            let end = rest.find(char::is_whitespace)
                .ok_or_else(|| format!("missing type in `{rest}`"))?;
            (rest[..end].to_string(), rest[end..].trim())
        },
        None => return Err("empty attribute declaration".to_string()),
    };

    let lower = decl.to_ascii_lowercase();
    let kind = if decl.starts_with('{') {
        AttributeKind::Nominal
    } else if ["numeric", "real", "integer"].iter().any(|t| lower.starts_with(t)) {
        AttributeKind::Numeric
    } else if lower.starts_with("string") || lower.starts_with("date") {
        AttributeKind::Nominal
    } else {
        return Err(format!("unknown type `{decl}` of attribute `{name}`"));
    };
    Ok(Attribute::new(name, kind))
}


/// Split `line` at `sep`, honoring single and double quotes.
/// Surrounding quotes and whitespace are stripped from each token.
fn split_quoted(line: &str, sep: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => { quote = None; },
            Some(_) => { current.push(c); },
            None if c == '\'' || c == '"' => { quote = Some(c); },
            None if c == sep => {
                tokens.push(current.trim().to_string());
                current.clear();
            },
            None => { current.push(c); },
        }
    }
    tokens.push(current.trim().to_string());
    tokens
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ARFF: &str = "\
% toy relation
@relation 'weather'
@attribute outlook {sunny, overcast, rainy}
@attribute temperature numeric
@attribute 'play golf' {yes, no}

@data
sunny,85,no
overcast,?,yes
'rainy',70.5,yes
";

    #[test]
    fn test_read_arff() {
        let data = read_arff(Cursor::new(ARFF)).unwrap();
        assert_eq!(data.shape(), (3, 3));
        assert_eq!(data.attribute_names(), vec!["outlook", "temperature", "play golf"]);
        assert_eq!(
            data.attribute("temperature").unwrap().kind,
            AttributeKind::Numeric
        );
        assert!(data[1]["temperature"].is_missing());
        assert_eq!(data[2]["outlook"], Value::from("rainy"));
        assert_eq!(data[2]["temperature"], Value::from(70.5));
    }

    #[test]
    fn test_read_arff_wrong_arity() {
        let text = "@attribute a numeric\n@data\n1,2\n";
        let res = read_arff(Cursor::new(text));
        assert!(matches!(res, Err(Id3Error::Parse { line: 3, .. })));
    }

    #[test]
    fn test_read_csv() {
        let text = "x,color\n1.5,red\n?,blue\n3,red\n";
        let data = read_csv(Cursor::new(text), true).unwrap();
        assert_eq!(data.shape(), (3, 2));
        assert_eq!(data.attribute("x").unwrap().kind, AttributeKind::Numeric);
        assert!(data[1]["x"].is_missing());

        let data = read_csv(Cursor::new("a,b\nc,d\n"), false).unwrap();
        assert_eq!(data.attribute_names(), vec!["Attr. [1]", "Attr. [2]"]);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_read_csv_blank_lines() {
        let text = "x,color\n\n1.5,red\n\n\n2,blue\n";
        let data = read_csv(Cursor::new(text), true).unwrap();
        assert_eq!(data.shape(), (2, 2));
        assert_eq!(data[1]["x"], Value::from(2));

        // Lines are counted in the raw file, blank ones included.
        let text = "x,color\n\n1.5,red\n\n3\n";
        let res = read_csv(Cursor::new(text), true);
        assert!(
            matches!(res, Err(Id3Error::Parse { line: 5, .. })),
            "got {res:?}."
        );
    }

    #[test]
    fn test_split_quoted() {
        let tokens = split_quoted("'White-European', 'a,b' ,c", ',');
        assert_eq!(tokens, vec!["White-European", "a,b", "c"]);
    }
}
