/// One parsed source record: a production and its credited persons.
#[derive(Debug, Clone, PartialEq)]
pub struct CastRow {
    pub title_id: String,
    pub title_name: String,
    pub person_ids: Vec<String>,
    pub person_names: Vec<String>,
}

/// Splits one line of delimited text into field values.
///
/// A line containing a tab is treated as tab-delimited; everything else is
/// parsed as quote-aware CSV where `""` inside a quoted field is a literal
/// quote and commas inside quotes do not split.
pub fn parse_delimited_line(line: &str) -> Vec<String> {
    if line.contains('\t') {
        return line.split('\t').map(str::to_string).collect();
    }
    parse_csv_line(line)
}

fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// Splits a nested list field on the first separator it contains, checking
/// `,` then `;` then `|`. Sub-tokens are trimmed and empties discarded.
pub fn split_id_list(field: &str) -> Vec<String> {
    let separator = [',', ';', '|']
        .into_iter()
        .find(|&sep| field.contains(sep));

    let tokens: Box<dyn Iterator<Item = &str>> = match separator {
        Some(sep) => Box::new(field.split(sep)),
        None => Box::new(std::iter::once(field)),
    };

    tokens
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses one source line into a `CastRow`. Rows with fewer than 4 fields
/// are malformed and yield `None`; the caller decides how to report them.
pub fn parse_cast_row(line: &str) -> Option<CastRow> {
    let fields = parse_delimited_line(line);
    if fields.len() < 4 {
        return None;
    }

    Some(CastRow {
        title_id: fields[0].trim().to_string(),
        title_name: fields[1].trim().to_string(),
        person_ids: split_id_list(&fields[2]),
        person_names: split_id_list(&fields[3]),
    })
}
