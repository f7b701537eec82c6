//! Request URI construction.
//!
//! The resolved URI is the endpoint template with its positional
//! placeholders filled, followed by any query parameters. Values are inserted
//! as given: nothing is percent-encoded, callers pass pre-encoded values.

use crate::{EndpointConfig, Error, Result};

/// Build the request URI for `config`.
///
/// Without bindings the template is used verbatim and `arguments` are
/// ignored. With bindings, exactly one argument per binding must be supplied.
///
/// ```
/// use declaro_core::{build_uri, EndpointConfig};
///
/// let config = EndpointConfig::get("api/weather?City={0}&Date={1}")
///     .with_argument("city", 0)
///     .with_argument("date", 1);
///
/// let arguments = vec!["Budapest".to_string(), "2023-09-22".to_string()];
/// let uri = build_uri(&config, Some(arguments.as_slice()), &[("District", "13")]).unwrap();
/// assert_eq!(uri, "api/weather?City=Budapest&Date=2023-09-22&District=13");
/// ```
pub fn build_uri<K, V>(
    config: &EndpointConfig,
    arguments: Option<&[String]>,
    query: &[(K, V)],
) -> Result<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let path = if config.bindings.is_empty() {
        config.endpoint.clone()
    } else {
        let arguments = arguments.unwrap_or_default();
        if arguments.len() != config.bindings.len() {
            return Err(Error::FormatMismatch {
                endpoint: config.endpoint.clone(),
                expected: config.bindings.len(),
                actual: arguments.len(),
            });
        }
        format_template(&config.endpoint, arguments)?
    };

    Ok(append_query(path, query))
}

/// Substitute `{index}` placeholders with `arguments[index]`.
///
/// `{{` and `}}` produce literal braces.
pub fn format_template(template: &str, arguments: &[String]) -> Result<String> {
    let invalid = |reason: &str| Error::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '{' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        Some(_) => return Err(invalid("placeholder must be a number")),
                        None => return Err(invalid("unterminated placeholder")),
                    }
                }
                let index: usize = digits
                    .parse()
                    .map_err(|_| invalid("empty placeholder"))?;
                let value = arguments.get(index).ok_or_else(|| Error::FormatMismatch {
                    endpoint: template.to_string(),
                    expected: index + 1,
                    actual: arguments.len(),
                })?;
                output.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '}' => return Err(invalid("unmatched '}'")),
            c => output.push(c),
        }
    }

    Ok(output)
}

/// Append `key=value` pairs, after `?` when the path has no query string yet
/// and after `&` otherwise.
pub fn append_query<K, V>(mut path: String, query: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if query.is_empty() {
        return path;
    }

    path.push(if path.contains('?') { '&' } else { '?' });
    let pairs: Vec<String> = query
        .iter()
        .map(|(key, value)| format!("{}={}", key.as_ref(), value.as_ref()))
        .collect();
    path.push_str(&pairs.join("&"));
    path
}
