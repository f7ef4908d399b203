//! フォームページの HTML を描画する

pub const TITLE: &str = "Prompt Booster for Proposals";
pub const HEADING: &str = "Natural Language to Structured Prompt Converter";
pub const INPUT_LABEL: &str = "Enter your raw or simple prompt here";
pub const INPUT_PLACEHOLDER: &str = "e.g. Write about electrical design...";
pub const BUTTON_LABEL: &str = "Boost Prompt";
pub const OUTPUT_LABEL: &str = "Boosted Prompt";

/// 入力欄と出力欄を埋めたページ全体を返す。
/// textarea 開始タグ直後の改行はパーサが読み捨てるため、値の前に 1 つ余分に出力する
pub fn render(input: &str, output: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
.row {{ display: flex; gap: 2rem; }}
.col {{ flex: 1; display: flex; flex-direction: column; gap: 0.5rem; }}
textarea {{ width: 100%; font-family: inherit; }}
</style>
</head>
<body>
<h3>{heading}</h3>
<form method="post" action="/">
<div class="row">
<div class="col">
<label for="prompt">{input_label}</label>
<textarea id="prompt" name="prompt" rows="5" placeholder="{placeholder}">
{input}</textarea>
<button type="submit">{button}</button>
</div>
<div class="col">
<label for="output">{output_label}</label>
<textarea id="output" rows="20" readonly>
{output}</textarea>
</div>
</div>
</form>
</body>
</html>
"#,
        title = TITLE,
        heading = HEADING,
        input_label = INPUT_LABEL,
        placeholder = escape_html(INPUT_PLACEHOLDER),
        input = escape_html(input),
        button = BUTTON_LABEL,
        output_label = OUTPUT_LABEL,
        output = escape_html(output),
    )
}

/// HTML 特殊文字をエスケープする
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A" & 'B'</b>"#),
            "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_empty_form() {
        let html = render("", "");
        assert!(html.contains("<title>Prompt Booster for Proposals</title>"));
        assert!(html.contains(HEADING));
        assert!(html.contains(r#"name="prompt" rows="5""#));
        assert!(html.contains(r#"rows="20""#));
        assert!(html.contains(BUTTON_LABEL));
    }

    #[test]
    fn test_render_escapes_user_text() {
        let html = render("<script>alert(1)</script>", "a & b");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains(">\na &amp; b</textarea>"));
    }

    #[test]
    fn test_render_keeps_leading_newline() {
        let html = render("\nprompt", "\nX");
        assert!(html.contains("readonly>\n\nX</textarea>"));
        assert!(html.contains(">\n\nprompt</textarea>"));
    }
}
