/// Render the single page with the model name in the footer.
pub fn render(model_description: &str) -> String {
    PAGE_TEMPLATE.replace("{{MODEL}}", model_description)
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI Text Detector</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🤖</text></svg>">
    <style>
        body { font-family: system-ui, sans-serif; max-width: 720px; margin: 40px auto; padding: 0 20px; color: #262730; }
        textarea { width: 100%; height: 200px; font: inherit; padding: 10px; box-sizing: border-box; }
        button { margin-top: 12px; padding: 8px 18px; font: inherit; color: #fff; background: #ff4b4b; border: 0; border-radius: 6px; cursor: pointer; }
        button:disabled { opacity: .6; cursor: wait; }
        .status { padding: 12px 16px; border-radius: 6px; font-weight: 600; }
        .success { background: #e8f5e9; color: #1b5e20; }
        .error { background: #ffebee; color: #b71c1c; }
        .warning { background: #fff8e1; color: #8d6e00; }
        .metric .name { font-size: 14px; color: #6b6f7b; }
        .metric .value { font-size: 32px; }
        .columns { display: flex; gap: 24px; }
        .columns .metric { flex: 1; }
        footer { margin-top: 32px; font-size: 13px; color: #6b6f7b; }
        hr { border: 0; border-top: 1px solid #e6e6e6; margin: 24px 0; }
    </style>
</head>
<body>
    <h1>🤖 AI vs Human Text Detector</h1>
    <p>Enter some text below to check if it was written by <b>AI</b> or a <b>Human</b>.</p>

    <label for="text">Paste your text here:</label>
    <textarea id="text" placeholder="Enter the text you want to analyze..."></textarea>
    <button id="analyze">🔍 Analyze Text</button>

    <div id="result"></div>

    <hr>
    <footer>Model: {{MODEL}}</footer>

    <script>
        const result = document.getElementById('result');
        const button = document.getElementById('analyze');

        function el(tag, className, text) {
            const node = document.createElement(tag);
            if (className) node.className = className;
            if (text !== undefined) node.textContent = text;
            return node;
        }

        function metric(name, value) {
            const box = el('div', 'metric');
            box.append(el('div', 'name', name), el('div', 'value', value));
            return box;
        }

        function show(view) {
            result.replaceChildren();
            switch (view.state) {
                case 'warning':
                    result.append(el('p', 'status warning', view.message));
                    break;
                case 'error':
                    result.append(el('p', 'status error', view.message));
                    break;
                case 'result': {
                    const icon = view.style === 'error' ? '🤖 ' : '✍️ ';
                    const columns = el('div', 'columns');
                    columns.append(metric('Human', view.human), metric('AI', view.ai));
                    result.append(
                        el('hr'),
                        el('h3', null, 'Result:'),
                        el('p', 'status ' + view.style, icon + view.label),
                        metric('Confidence', view.confidence),
                        el('h5', null, 'Probability Breakdown:'),
                        columns,
                    );
                    break;
                }
            }
        }

        button.addEventListener('click', async () => {
            button.disabled = true;
            try {
                const response = await fetch('/api/analyze', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ text: document.getElementById('text').value }),
                });
                show(await response.json());
            } catch (err) {
                show({ state: 'error', message: 'Request failed: ' + err });
            } finally {
                button.disabled = false;
            }
        });
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_names_the_model() {
        let html = render("Logistic Regression + TF-IDF");
        assert!(html.contains("Model: Logistic Regression + TF-IDF"));
        assert!(!html.contains("{{MODEL}}"));
    }
}
