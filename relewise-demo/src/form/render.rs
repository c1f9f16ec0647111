//! HTML rendering of the form page

use super::FormState;
use crate::example::ExampleId;
use std::fmt::Write;

/// Output area text before anything has run
pub const PLACEHOLDER: &str = r#"Click "Run" to execute the selected example"#;

const STYLE: &str = r#"
        body { font-family: system-ui, sans-serif; padding: 10px; }
        .picker { margin-bottom: 16px; display: flex; gap: 8px; align-items: center; }
        .picker label { font-weight: 600; font-size: 14px; }
        .picker select { padding: 6px 8px; font-size: 14px; }
        .field { margin-bottom: 12px; }
        .field label { display: block; margin-bottom: 4px; font-size: 14px; font-weight: 500; }
        .field input {
            width: 100%;
            padding: 8px;
            font-size: 14px;
            border: 1px solid #ccc;
            border-radius: 4px;
            box-sizing: border-box;
            font-family: inherit;
        }
        button { margin-bottom: 20px; }
        pre {
            padding: 16px;
            background-color: #f5f5f5;
            border-radius: 4px;
            overflow: auto;
            min-height: 200px;
        }
"#;

/// Render the whole page for `state`
pub fn render(state: &FormState) -> String {
    let running = state.is_running();
    let disabled = if running { " disabled" } else { "" };

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    let _ = writeln!(html, "    <title>{}</title>", escape(state.selected.label()));
    let _ = writeln!(html, "    <style>{}    </style>", STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str(
        "<form method=\"post\" action=\"/run\" \
         onsubmit=\"this.querySelector('button').disabled = true; \
         this.querySelector('button').textContent = 'Running...';\">\n",
    );

    html.push_str("    <div class=\"picker\">\n");
    html.push_str("        <label for=\"example\">Example</label>\n");
    let _ = writeln!(html, "        <select id=\"example\" name=\"example\"{}>", disabled);
    for id in ExampleId::ALL {
        let selected = if id == state.selected { " selected" } else { "" };
        let _ = writeln!(
            html,
            "            <option value=\"{}\"{}>{}</option>",
            id.as_str(),
            selected,
            escape(id.label())
        );
    }
    html.push_str("        </select>\n    </div>\n");

    let _ = writeln!(html, "    <h2>{}</h2>", escape(state.selected.label()));

    html.push_str("    <div class=\"fields\">\n");
    push_field(&mut html, "dataset_id", "Dataset ID", "text", &state.dataset_id, "Enter dataset ID", running);
    push_field(&mut html, "api_key", "API Key", "password", &state.api_key, "Enter API key", running);
    push_field(&mut html, "server_url", "Server URL", "text", &state.server_url, "Enter server URL", running);
    html.push_str("    </div>\n");

    let _ = writeln!(
        html,
        "    <button type=\"submit\"{}>{}</button>",
        disabled,
        if running { "Running..." } else { "Run" }
    );
    html.push_str("</form>\n");

    let output = if state.output.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        state.output.join("\n")
    };
    let _ = writeln!(html, "<pre id=\"output\">{}</pre>", escape(&output));

    html.push_str("</body>\n</html>\n");
    html
}

fn push_field(
    html: &mut String,
    name: &str,
    label: &str,
    input_type: &str,
    value: &str,
    placeholder: &str,
    disabled: bool,
) {
    let _ = write!(
        html,
        "        <div class=\"field\">\n\
         \x20           <label for=\"{name}\">{label}</label>\n\
         \x20           <input id=\"{name}\" name=\"{name}\" type=\"{input_type}\" value=\"{value}\" placeholder=\"{placeholder}\"{disabled}>\n\
         \x20       </div>\n",
        name = name,
        label = label,
        input_type = input_type,
        value = escape(value),
        placeholder = placeholder,
        disabled = if disabled { " disabled" } else { "" },
    );
}

/// Escape text for element content and double-quoted attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormEvent, Phase};

    #[test]
    fn test_idle_page() {
        let state = FormState::new(ExampleId::ProductSearch);
        let html = render(&state);

        assert!(html.contains("<h2>Product Search</h2>"));
        assert!(html.contains("<option value=\"product-search\" selected>"));
        assert!(html.contains("type=\"password\""));
        assert!(html.contains(">Run</button>"));
        assert!(html.contains("Click &quot;Run&quot; to execute the selected example"));
        assert!(!html.contains(" disabled>"));
    }

    #[test]
    fn test_running_page_disables_inputs() {
        let mut state = FormState::new(ExampleId::SearchTermPrediction);
        state.phase = Phase::Running;
        let html = render(&state);

        assert!(html.contains(">Running...</button>"));
        assert_eq!(html.matches(" disabled>").count(), 5);
    }

    #[test]
    fn test_output_is_joined_and_escaped() {
        let mut state = FormState::new(ExampleId::default());
        state.apply(FormEvent::SetApiKey("a\"b".into()));
        state.output = vec!["{\n  \"a\": 1\n}".into(), "Error: <boom>".into()];
        let html = render(&state);

        assert!(html.contains("value=\"a&quot;b\""));
        assert!(html.contains("{\n  &quot;a&quot;: 1\n}\nError: &lt;boom&gt;</pre>"));
    }

    #[test]
    fn test_render_is_pure() {
        let state = FormState::new(ExampleId::ProductSearch);
        assert_eq!(render(&state), render(&state));
    }
}
