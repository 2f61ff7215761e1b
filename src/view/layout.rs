use super::escape_html;
use crate::store::{Page, PageSnapshot};

/// 공통 셸 (헤더 + 내비게이션 + 본문)
pub(super) fn render_shell(snapshot: &PageSnapshot, content: &str) -> String {
    let nav = Page::ALL
        .iter()
        .map(|page| {
            let class = if *page == snapshot.page { "nav active" } else { "nav" };
            format!(
                r#"<a class="{class}" href="{href}">{label}</a>"#,
                href = page.path(),
                label = page.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let error = snapshot
        .error
        .as_deref()
        .map(|message| format!(r#"<div class="banner error">{}</div>"#, escape_html(message)))
        .unwrap_or_default();
    let notice = snapshot
        .notice
        .as_deref()
        .map(|message| format!(r#"<div class="banner notice">{}</div>"#, escape_html(message)))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title} • Auction Analysis Agent</title>
    <style>{STYLE}</style>
  </head>
  <body>
    <header class="topbar"><h1>Auction Analysis Agent</h1></header>
    <div class="shell">
      <nav class="navbar">
        <h4>Navigation</h4>
        {nav}
      </nav>
      <main>
        {error}
        {notice}
        {content}
      </main>
    </div>
  </body>
</html>"#,
        title = snapshot.page.title(),
    )
}

const STYLE: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: ui-sans-serif, system-ui, sans-serif; background: #111; color: #eee; }
.topbar { height: 60px; display: flex; align-items: center; padding: 0 1rem; border-bottom: 1px solid #333; }
.topbar h1 { font-size: 1.25rem; margin: 0; }
.shell { display: flex; }
.navbar { width: 240px; padding: 1rem; border-right: 1px solid #333; min-height: calc(100vh - 60px); }
.nav { display: block; padding: 0.5rem; color: #ccc; text-decoration: none; border-radius: 4px; }
.nav.active { background: #1c3d5a; color: #fff; }
main { flex: 1; padding: 1rem 2rem; }
.banner { padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.banner.error { background: rgba(255,77,77,0.15); color: #ff6b6b; }
.banner.notice { background: rgba(241,196,15,0.12); color: #f1c40f; }
.toolbar { display: flex; gap: 0.5rem; flex-wrap: wrap; align-items: center; margin-bottom: 1.5rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.5rem; }
.card { border: 1px solid #333; border-radius: 8px; padding: 1rem; background: #222; display: flex; flex-direction: column; gap: 0.5rem; }
.card.selected { border-color: #0070f3; }
.card img { width: 100%; height: 180px; object-fit: cover; border-radius: 4px; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 999px; font-size: 0.8rem; font-weight: 700; }
.badge.price { background: #5a1c3d; }
.badge.estimate { background: #5a4a1c; }
.gain { color: #2ecc71; }
.loss { color: #ff6b6b; }
.dimmed { color: #999; font-size: 0.875rem; }
.row { display: flex; gap: 0.5rem; align-items: center; justify-content: space-between; flex-wrap: wrap; }
form { display: inline; margin: 0; }
button { cursor: pointer; padding: 0.35rem 0.8rem; border: none; border-radius: 5px; background: #0070f3; color: #fff; }
button.secondary { background: #444; }
button.grape { background: #8e44ad; }
button:disabled { opacity: 0.6; cursor: default; }
a { color: #3498db; }
.overlay { position: fixed; inset: 0; background: rgba(0,0,0,0.7); display: flex; align-items: flex-start; justify-content: center; overflow-y: auto; padding: 3rem 1rem; }
.modal { background: #1b1b1b; border: 1px solid #333; border-radius: 10px; width: min(760px, 100%); padding: 1.5rem; display: flex; flex-direction: column; gap: 1rem; }
.modal .images { display: flex; gap: 0.5rem; overflow-x: auto; }
.modal .images img { height: 300px; object-fit: contain; }
.analysis { white-space: pre-wrap; max-height: 300px; overflow-y: auto; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #333; }
"#;
