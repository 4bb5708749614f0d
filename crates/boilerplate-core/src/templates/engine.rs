//! `{{.Field}}` substitution
//!
//! The grammar is deliberately small: a marker is `{{`, optional whitespace,
//! a dot, an identifier, optional whitespace, `}}`. Everything outside a
//! marker is copied verbatim.

use super::TemplateError;
use crate::generator::ProjectSpec;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// The fixed variable set available to every template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    pub project_name: String,
    pub version: String,
}

impl TemplateVars {
    pub fn new(project_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            version: version.into(),
        }
    }

    /// Exact-name lookup, as written after the dot in a marker
    pub fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "ProjectName" => Some(&self.project_name),
            "Version" => Some(&self.version),
            _ => None,
        }
    }
}

impl From<&ProjectSpec> for TemplateVars {
    fn from(spec: &ProjectSpec) -> Self {
        Self::new(spec.name.clone(), spec.version.clone())
    }
}

/// Render `template` against `vars`
///
/// Referencing a variable outside the fixed set is an error rather than an
/// empty substitution.
pub fn render(template: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut consumed = 0;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let offset = consumed + start;

        let after_open = &rest[start + OPEN.len()..];
        let end = after_open
            .find(CLOSE)
            .ok_or(TemplateError::Unclosed { offset })?;

        let action = after_open[..end].trim();
        let field = parse_field(action, offset)?;
        let value = vars
            .lookup(field)
            .ok_or_else(|| TemplateError::UndefinedVariable(field.to_string()))?;
        out.push_str(value);

        let advance = start + OPEN.len() + end + CLOSE.len();
        consumed += advance;
        rest = &rest[advance..];
    }

    out.push_str(rest);
    Ok(out)
}

fn parse_field(action: &str, offset: usize) -> Result<&str, TemplateError> {
    if action.is_empty() {
        return Err(TemplateError::EmptyAction { offset });
    }

    let field = action
        .strip_prefix('.')
        .ok_or_else(|| TemplateError::UnsupportedAction {
            offset,
            action: action.to_string(),
        })?;

    let valid = field
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        return Err(TemplateError::UnsupportedAction {
            offset,
            action: action.to_string(),
        });
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> TemplateVars {
        TemplateVars::new("demo-app", "1.0.0")
    }

    #[test]
    fn test_substitutes_both_variables() {
        let out = render(
            "fmt.Println(\"Welcome to {{.ProjectName}}!\")\nVersion: {{.Version}}\n",
            &vars(),
        )
        .unwrap();
        assert_eq!(out, "fmt.Println(\"Welcome to demo-app!\")\nVersion: 1.0.0\n");
    }

    #[test]
    fn test_whitespace_inside_marker() {
        let out = render("import \"{{ .ProjectName }}/infra\"", &vars()).unwrap();
        assert_eq!(out, "import \"demo-app/infra\"");
    }

    #[test]
    fn test_text_without_markers_is_untouched() {
        let src = "func main() { if x { return } }\n";
        assert_eq!(render(src, &vars()).unwrap(), src);
    }

    #[test]
    fn test_unclosed_marker_reports_offset() {
        let err = render("abc {{.ProjectName", &vars()).unwrap_err();
        assert!(matches!(err, TemplateError::Unclosed { offset: 4 }));
    }

    #[test]
    fn test_empty_action_is_syntax_error() {
        let err = render("x{{   }}", &vars()).unwrap_err();
        assert!(matches!(err, TemplateError::EmptyAction { offset: 1 }));
    }

    #[test]
    fn test_non_field_action_is_syntax_error() {
        let err = render("{{ range .Items }}", &vars()).unwrap_err();
        assert!(matches!(err, TemplateError::UnsupportedAction { .. }));

        let err = render("{{.Project-Name}}", &vars()).unwrap_err();
        assert!(matches!(err, TemplateError::UnsupportedAction { .. }));
    }

    #[test]
    fn test_undefined_variable_is_an_error() {
        let err = render("{{.Author}}", &vars()).unwrap_err();
        match err {
            TemplateError::UndefinedVariable(name) => assert_eq!(name, "Author"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(render("{{.projectname}}", &vars()).is_err());
    }

    #[test]
    fn test_offset_accounts_for_earlier_markers() {
        let err = render("{{.Version}} and {{.Nope", &vars()).unwrap_err();
        assert!(matches!(err, TemplateError::Unclosed { offset: 17 }));
    }
}
