//! Page-side scripts, evaluated in an isolated world per frame.
//!
//! Each script body runs as `(function (args) { PRELUDE BODY })(ARGS)`.
//! Elements are addressed by a `data-formpilot-ref` attribute; the counter
//! lives on the document element so every world in a frame shares it.

use serde_json::Value;

const PRELUDE: &str = r#"
const REF_ATTR = 'data-formpilot-ref';
const SEQ_ATTR = 'data-formpilot-seq';
const refOf = (el) => {
  let ref = el.getAttribute(REF_ATTR);
  if (ref === null) {
    const root = document.documentElement;
    const next = Number(root.getAttribute(SEQ_ATTR) || '0') + 1;
    root.setAttribute(SEQ_ATTR, String(next));
    ref = String(next);
    el.setAttribute(REF_ATTR, ref);
  }
  return Number(ref);
};
const byRef = (ref) => {
  const el = document.querySelector('[' + REF_ATTR + '="' + ref + '"]');
  if (!el) throw new Error('stale element ' + ref);
  return el;
};
const rendered = (el) => !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
const visible = (el) => rendered(el) && getComputedStyle(el).visibility !== 'hidden';
const fire = (el, type) => el.dispatchEvent(new Event(type, { bubbles: true }));
const textOf = (el) =>
  (el.tagName === 'INPUT' ? el.value || '' : el.innerText || el.textContent || '').trim();
const mark = (el, style) => {
  for (const [key, value] of Object.entries(style || {})) el.style[key] = value;
};
const topCenter = (el) => {
  const rect = el.getBoundingClientRect();
  if (!rect.width && !rect.height) return null;
  let x = rect.left + rect.width / 2;
  let y = rect.top + rect.height / 2;
  let win = window;
  try {
    while (win.frameElement) {
      const host = win.frameElement;
      const box = host.getBoundingClientRect();
      x += box.left + host.clientLeft;
      y += box.top + host.clientTop;
      win = win.parent;
    }
  } catch (e) {
    return null;
  }
  return win === window.top ? { x, y } : null;
};
"#;

pub const SCAN_CONTROLS: &str = r#"
const selector = 'input:not([type="hidden"]):not([type="submit"]):not([type="button"]):not([type="reset"]), textarea, select';
const out = [];
for (const el of document.querySelectorAll(selector)) {
  const tag = el.tagName.toLowerCase();
  const row = el.closest('tr');
  out.push({
    handle: refOf(el),
    tag,
    inputType: tag === 'input' ? (el.getAttribute('type') || 'text').toLowerCase() : '',
    concealed: !!args.marker && el.closest('.' + CSS.escape(args.marker)) !== null,
    rendered: rendered(el),
    readOnly: !!el.readOnly,
    disabled: !!el.disabled,
    checked: !!el.checked,
    optionCount: tag === 'select' ? el.options.length : 0,
    signal: {
      title: el.getAttribute('title') || '',
      name: el.getAttribute('name') || '',
      id: el.id || '',
      placeholder: el.getAttribute('placeholder') || '',
      labels: el.labels ? Array.from(el.labels, (l) => (l.innerText || '').trim()) : [],
      rowText: row ? row.innerText || '' : '',
    },
  });
}
return out;
"#;

pub const APPLY_VALUE: &str = r#"
const el = byRef(args.ref);
const value = args.value;
switch (value.kind) {
  case 'alternateOption':
    el.selectedIndex = value.index;
    fire(el, 'change');
    break;
  case 'checkedBoolean':
    el.checked = true;
    fire(el, 'click');
    fire(el, 'change');
    break;
  default:
    el.value = value.value;
    fire(el, 'input');
    fire(el, 'change');
    fire(el, 'blur');
}
mark(el, args.style);
return true;
"#;

pub const FIND_BY_ID_SUFFIX: &str = r#"
for (const el of document.querySelectorAll(args.selector)) {
  if (el.id && el.id.endsWith(args.suffix) && visible(el)) return refOf(el);
}
return null;
"#;

pub const FIND_BY_TEXT: &str = r#"
for (const el of document.querySelectorAll(args.selector)) {
  if (!visible(el)) continue;
  const text = textOf(el);
  if (args.texts.some((t) => t && (args.exact ? text === t : text.includes(t)))) return refOf(el);
}
return null;
"#;

pub const FIND_BY_SELECTOR: &str = r#"
for (const el of document.querySelectorAll(args.selector)) {
  if (visible(el)) return refOf(el);
}
return null;
"#;

/// Scrolls the element into view and returns its centre in top-level
/// viewport coordinates, or null when it has no box or an ancestor frame
/// is not reachable.
pub const CLICK_POINT: &str = r#"
const el = byRef(args.ref);
el.scrollIntoView({ block: 'center', inline: 'center' });
return topCenter(el);
"#;

pub const CLICK_DIRECT: &str = r#"
byRef(args.ref).click();
return true;
"#;

pub const HIGHLIGHT: &str = r#"
mark(byRef(args.ref), args.style);
return true;
"#;

pub const TYPE_TEXT: &str = r#"
const el = byRef(args.ref);
el.focus();
el.value = args.text;
fire(el, 'input');
fire(el, 'change');
return true;
"#;

pub const LIST_BOXES: &str = r#"
const out = [];
for (const el of document.querySelectorAll('select')) {
  if (!visible(el)) continue;
  out.push({
    handle: refOf(el),
    options: Array.from(el.options, (o) => (o.innerText || o.text || '').trim()),
    selectedIndex: el.selectedIndex >= 0 ? el.selectedIndex : null,
  });
}
return out;
"#;

pub const SELECT_OPTION: &str = r#"
const el = byRef(args.ref);
const option = el.options[args.index];
if (!option) throw new Error('stale element ' + args.ref + ' option ' + args.index);
el.scrollIntoView({ block: 'center' });
el.selectedIndex = args.index;
option.selected = true;
fire(el, 'change');
return true;
"#;

/// Centre of the option element, or null when options have no layout box
/// of their own (collapsed dropdowns).
pub const OPTION_POINT: &str = r#"
const el = byRef(args.ref);
const option = el.options[args.index];
if (!option) throw new Error('stale element ' + args.ref + ' option ' + args.index);
if (!option.getClientRects().length) return null;
option.scrollIntoView({ block: 'nearest' });
return topCenter(option);
"#;

pub const DISPATCH_DBLCLICK: &str = r#"
const el = byRef(args.ref);
el.dispatchEvent(new MouseEvent('dblclick', { bubbles: true, cancelable: true }));
return true;
"#;

/// Wrap a script body with the prelude and its JSON arguments.
pub fn compose(body: &str, args: &Value) -> String {
    let args = args.to_string();
    let mut expression = String::with_capacity(PRELUDE.len() + body.len() + args.len() + 32);
    expression.push_str("(function (args) {");
    expression.push_str(PRELUDE);
    expression.push_str(body);
    expression.push_str("})(");
    expression.push_str(&args);
    expression.push(')');
    expression
}
