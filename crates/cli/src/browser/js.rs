//! Page-side scripts evaluated through CDP.

use super::driver::Locator;

/// Shared visibility test: rendered box, not `display: none`, not `visibility: hidden`.
const IS_VISIBLE_FN: &str = r#"const isVisible = (el) => {
				const style = window.getComputedStyle(el);
				if (style.display === 'none' || style.visibility === 'hidden') return false;
				const rect = el.getBoundingClientRect();
				return rect.width > 0 && rect.height > 0;
			};"#;

/// Builds an expression that evaluates to `true` when `locator` matches a visible element.
pub fn visibility_js(locator: &Locator) -> String {
	match locator {
		Locator::Css(selector) => {
			let selector = js_string(selector);
			format!(
				r#"(() => {{
			{IS_VISIBLE_FN}
			let matches;
			try {{
				matches = document.querySelectorAll({selector});
			}} catch (_) {{
				return false;
			}}
			return Array.from(matches).some(isVisible);
		}})()"#
			)
		}
		Locator::Text(text) => text_search_js(&text.to_lowercase(), "text.toLowerCase().includes(needle)"),
		Locator::ExactText(text) => {
			let needle = text.split_whitespace().collect::<Vec<_>>().join(" ");
			text_search_js(&needle, "text.trim() === needle")
		}
	}
}

/// Walks visible text nodes, testing each whitespace-normalized `text` with `matches`.
fn text_search_js(needle: &str, matches: &str) -> String {
	let needle = js_string(needle);
	format!(
		r#"(() => {{
			{IS_VISIBLE_FN}
			if (!document.body) return false;
			const needle = {needle};
			const walker = document.createTreeWalker(document.body, NodeFilter.SHOW_TEXT);
			while (walker.nextNode()) {{
				const node = walker.currentNode;
				const text = node.textContent.replace(/\s+/g, ' ');
				if (!({matches})) continue;
				if (node.parentElement && isVisible(node.parentElement)) return true;
			}}
			return false;
		}})()"#
	)
}

/// Quotes `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
	serde_json::Value::String(value.to_string()).to_string()
}
