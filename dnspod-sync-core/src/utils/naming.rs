//! Declarative identifiers and quoting for exported configuration

/// Identifier of a domain block: dots become underscores.
pub fn domain_identifier(domain_name: &str) -> String {
    domain_name.replace('.', "_")
}

/// Host part of a record identifier.
pub fn sanitize_sub_domain(sub_domain: &str) -> String {
    sub_domain
        .replace('.', "_")
        .replace('*', "wildcard")
        .replace('@', "at")
}

/// `<domainIdent>_<sub_domain>_<record_id>`.
///
/// The record id keeps identifiers unique even when two records share a
/// host name, since record ids are unique within a domain.
pub fn record_identifier(domain_name: &str, sub_domain: &str, record_id: &str) -> String {
    format!(
        "{}_{}_{}",
        domain_identifier(domain_name),
        sanitize_sub_domain(sub_domain),
        record_id
    )
}

/// Quote `s` as an HCL string literal.
pub fn hcl_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // 模板插值
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
