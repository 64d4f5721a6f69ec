use crate::domain::api_config::HttpMethod;
use crate::domain::test_case::TestCase;

/// Everything the index page needs for one render.
#[derive(Debug, Default)]
pub struct IndexView {
    pub error: Option<String>,
    pub test_cases: Option<Vec<TestCase>>,
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Lowercase, class-safe token for styling a badge.
fn css_token(value: &str, fallback: &str) -> String {
    let token: String = value
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if token.is_empty() {
        fallback.to_string()
    } else {
        token
    }
}

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: linear-gradient(135deg, #10b981 0%, #059669 100%); min-height: 100vh; padding: 20px; }
.container { max-width: 1400px; margin: 0 auto; background: #fff; border-radius: 16px; box-shadow: 0 20px 60px rgba(0,0,0,.3); overflow: hidden; }
.header { background: linear-gradient(135deg, #10b981 0%, #059669 100%); color: #fff; padding: 30px; text-align: center; }
.content { padding: 30px; }
.alert-error { background: #fee2e2; color: #991b1b; border-left: 4px solid #dc2626; padding: 15px 20px; border-radius: 8px; margin-bottom: 20px; }
.form-section { background: #f8f9fa; padding: 20px; border-radius: 12px; margin-bottom: 20px; }
.section-title { font-weight: 600; margin-bottom: 15px; }
.form-row { display: grid; grid-template-columns: 1fr 3fr; gap: 15px; }
.form-group { margin-bottom: 15px; }
label { display: block; font-weight: 500; margin-bottom: 6px; }
input, select, textarea { width: 100%; padding: 10px 12px; border: 2px solid #e0e0e0; border-radius: 8px; font-size: 14px; }
textarea { min-height: 140px; font-family: monospace; }
.hidden { display: none; }
.btn { padding: 12px 24px; border: none; border-radius: 8px; font-weight: 600; cursor: pointer; text-decoration: none; display: inline-block; }
.btn-primary { background: #059669; color: #fff; width: 100%; font-size: 16px; }
.btn-secondary { background: #334155; color: #fff; }
.results { margin-top: 40px; }
.results-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; }
.stats { display: flex; gap: 15px; align-items: center; }
.table-container { overflow-x: auto; }
table { width: 100%; border-collapse: collapse; font-size: 14px; }
th { background: #059669; color: #fff; padding: 12px; text-align: left; }
td { padding: 12px; border-bottom: 1px solid #e5e7eb; vertical-align: top; }
.label, .severity, .priority { padding: 4px 10px; border-radius: 12px; font-size: 12px; font-weight: 600; }
.label-positive { background: #d1fae5; } .label-negative { background: #fee2e2; } .label-edge { background: #fef3c7; }
.label-security { background: #ede9fe; } .label-performance { background: #dbeafe; }
.severity-critical { background: #dc2626; color: #fff; } .severity-high { background: #f97316; color: #fff; }
.severity-medium { background: #facc15; } .severity-low { background: #a3e635; }
.priority { background: #e2e8f0; }
.code-block { background: #1e293b; color: #e2e8f0; padding: 8px; border-radius: 6px; font-family: monospace; font-size: 12px; white-space: pre-wrap; }
"#;

const SCRIPT: &str = r#"
document.getElementById('authRequired').addEventListener('change', function () {
    document.getElementById('authGroup').classList.toggle('hidden', this.value !== 'yes');
});
document.getElementById('method').addEventListener('change', function () {
    document.getElementById('bodySection').classList.toggle('hidden',
        !['POST', 'PUT', 'PATCH'].includes(this.value));
});
document.getElementById('generateForm').addEventListener('submit', function () {
    const btn = document.getElementById('generateBtn');
    btn.disabled = true;
    btn.textContent = 'Generating...';
});
"#;

const METHODS: [HttpMethod; 5] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Patch,
    HttpMethod::Delete,
];

fn render_form(html: &mut String) {
    html.push_str(r#"<form method="POST" action="/" id="generateForm">"#);

    html.push_str(r#"<div class="form-section"><div class="section-title">API Endpoint Configuration</div><div class="form-row">"#);
    html.push_str(r#"<div class="form-group"><label for="method">HTTP Method</label><select name="method" id="method" required>"#);
    for method in METHODS {
        html.push_str(&format!(
            r#"<option value="{0}">{0}</option>"#,
            method.as_str()
        ));
    }
    html.push_str("</select></div>");
    html.push_str(r#"<div class="form-group"><label for="endpoint">Endpoint URL</label><input type="text" name="endpoint" id="endpoint" placeholder="https://api.example.com/users" required></div>"#);
    html.push_str("</div></div>");

    html.push_str(r#"<div class="form-section"><div class="section-title">Authentication</div>"#);
    html.push_str(r#"<div class="form-group"><label for="authRequired">Authentication Required?</label><select name="authRequired" id="authRequired"><option value="no">No</option><option value="yes">Yes</option></select></div>"#);
    html.push_str(r#"<div class="form-group hidden" id="authGroup"><label for="authValue">Authentication (e.g., Bearer token)</label><input type="text" name="authValue" id="authValue" placeholder="Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."></div>"#);
    html.push_str("</div>");

    html.push_str(r#"<div class="form-section hidden" id="bodySection"><div class="section-title">Request Body</div>"#);
    html.push_str(r#"<div class="form-group"><label for="requestBody">Request Body (JSON)</label><textarea name="requestBody" id="requestBody" placeholder='{"name": "John Doe", "email": "john@example.com"}'></textarea></div>"#);
    html.push_str("</div>");

    html.push_str(r#"<button type="submit" class="btn btn-primary" id="generateBtn">Generate Test Cases</button>"#);
    html.push_str("</form>");
}

fn render_row(html: &mut String, test_case: &TestCase) {
    html.push_str("<tr>");
    html.push_str(&format!(
        "<td><strong>{}</strong></td>",
        escape_html(test_case.id())
    ));
    html.push_str(&format!("<td>{}</td>", escape_html(test_case.scenario())));
    html.push_str(&format!(
        r#"<td><span class="label label-{}">{}</span></td>"#,
        css_token(test_case.label(), "positive"),
        escape_html(test_case.label())
    ));
    html.push_str(&format!(
        r#"<td style="white-space: pre-line;">{}</td>"#,
        escape_html(test_case.steps())
    ));
    if test_case.has_request_body() {
        html.push_str(&format!(
            r#"<td><div class="code-block">{}</div></td>"#,
            escape_html(test_case.request_body())
        ));
    } else {
        html.push_str("<td>N/A</td>");
    }
    html.push_str(&format!(
        r#"<td><span class="severity severity-{}">{}</span></td>"#,
        css_token(test_case.severity(), "low"),
        escape_html(test_case.severity())
    ));
    html.push_str(&format!(
        r#"<td><span class="priority">{}</span></td>"#,
        escape_html(test_case.priority())
    ));
    html.push_str("</tr>");
}

fn render_results(html: &mut String, test_cases: &[TestCase]) {
    html.push_str(r#"<div class="results"><div class="results-header"><h2>Generated Test Cases</h2><div class="stats">"#);
    html.push_str(&format!(
        r#"<div class="stat-item"><strong id="totalTests">{}</strong> Total Tests</div>"#,
        test_cases.len()
    ));
    html.push_str(r#"<a href="/clear" class="btn btn-secondary">New Test</a>"#);
    html.push_str(r#"<a href="/export/csv" class="btn btn-secondary">Export to CSV</a>"#);
    html.push_str("</div></div>");

    html.push_str(r#"<div class="table-container"><table><thead><tr>"#);
    for title in ["ID", "Scenario", "Label", "Steps", "Request Body", "Severity", "Priority"] {
        html.push_str(&format!("<th>{}</th>", title));
    }
    html.push_str("</tr></thead><tbody>");
    for test_case in test_cases {
        render_row(html, test_case);
    }
    html.push_str("</tbody></table></div></div>");
}

pub fn render_index(view: &IndexView) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">");
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#);
    html.push_str("<title>API Test Case Generator</title><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body><div class=\"container\">");
    html.push_str(r#"<div class="header"><h1>API Test Case Generator</h1><p>Generate comprehensive test cases for your API endpoints</p></div>"#);
    html.push_str(r#"<div class="content">"#);

    if let Some(error) = &view.error {
        html.push_str(&format!(
            r#"<div class="alert alert-error"><strong>Error:</strong> {}</div>"#,
            escape_html(error)
        ));
    }

    render_form(&mut html);

    if let Some(test_cases) = view.test_cases.as_deref().filter(|cases| !cases.is_empty()) {
        render_results(&mut html, test_cases);
    }

    html.push_str("</div></div><script>");
    html.push_str(SCRIPT);
    html.push_str("</script></body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> TestCase {
        TestCase {
            id: Some("TC001".into()),
            scenario: Some("<script>alert(1)</script>".into()),
            label: Some("Security".into()),
            steps: Some("1. Send\n2. Check".into()),
            request_body: Some(r#"{"name": "x"}"#.into()),
            severity: Some("Critical".into()),
            priority: Some("P0".into()),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_empty_view_shows_only_form() {
        let html = render_index(&IndexView::default());
        assert!(html.contains(r#"name="endpoint""#));
        assert!(!html.contains("Generated Test Cases"));
        assert!(!html.contains("<strong>Error:</strong>"));
    }

    #[test]
    fn test_results_are_escaped_and_styled() {
        let html = render_index(&IndexView {
            error: None,
            test_cases: Some(vec![case()]),
        });
        assert!(html.contains("Generated Test Cases"));
        assert!(html.contains(r#"<strong id="totalTests">1</strong>"#));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("label label-security"));
        assert!(html.contains("severity severity-critical"));
        assert!(html.contains(r#"<div class="code-block">{&quot;name&quot;: &quot;x&quot;}</div>"#));
        assert!(html.contains(r#"href="/export/csv""#));
    }

    #[test]
    fn test_missing_values_use_default_badges() {
        let html = render_index(&IndexView {
            error: None,
            test_cases: Some(vec![TestCase::default()]),
        });
        assert!(html.contains("label label-positive"));
        assert!(html.contains("severity severity-low"));
        assert!(html.contains("<td>N/A</td>"));
    }

    #[test]
    fn test_error_is_rendered_escaped() {
        let html = render_index(&IndexView {
            error: Some("Request body is required for <POST> method".into()),
            test_cases: None,
        });
        assert!(html.contains("Request body is required for &lt;POST&gt; method"));
    }
}
