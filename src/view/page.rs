// region:    --- Imports
use super::layout::render_shell;
use super::modal::render_modal;
use super::{escape_html, format_usd, truncate};
use crate::auction::model::Auction;
use crate::auction::profit::ProfitEstimate;
use crate::store::{Page, PageSnapshot};

// endregion: --- Imports

/// 페이지 전체 렌더링
pub fn render_page(snapshot: &PageSnapshot) -> String {
    let page = snapshot.page;
    let mut content = String::new();

    content.push_str(&format!("<h2>{}</h2>\n", page.title()));
    if page == Page::Opportunities {
        content.push_str(
            "<p class=\"dimmed\">Auctions where the estimated value is at least 50% greater than the current price.</p>\n",
        );
    }
    content.push_str(&render_toolbar(snapshot));

    let visible: Vec<&Auction> = snapshot.visible().collect();
    if snapshot.activity.loading && visible.is_empty() {
        content.push_str("<p class=\"dimmed\">Loading auctions…</p>\n");
    } else if visible.is_empty() {
        content.push_str(&format!("<p>{}</p>\n", escape_html(page.empty_message())));
    } else {
        content.push_str("<div class=\"grid\">\n");
        for auction in visible {
            content.push_str(&render_card(snapshot, auction));
        }
        content.push_str("</div>\n");
    }

    if let Some(auction) = &snapshot.open_auction {
        content.push_str(&render_modal(snapshot, auction));
    }

    render_shell(snapshot, &content)
}

pub(super) fn action(page: Page, path: &str) -> String {
    format!("/pages/{}/{}", page.slug(), path)
}

// region:    --- Toolbar
fn render_toolbar(snapshot: &PageSnapshot) -> String {
    let page = snapshot.page;
    let activity = &snapshot.activity;
    let mut out = String::from("<div class=\"toolbar\">\n");

    if page == Page::Dashboard {
        let (label, disabled) = if activity.scraping {
            ("Scraping...", " disabled")
        } else {
            ("Scrape Auctions", "")
        };
        out.push_str(&format!(
            r#"<form method="post" action="{}"><button{disabled}>{label}</button></form>"#,
            action(page, "scrape")
        ));

        let (batch_label, batch_disabled) = if activity.batch_analyzing {
            ("Analyzing...".to_string(), " disabled")
        } else {
            (format!("Analyze Selected ({})", snapshot.selection.len()), "")
        };
        out.push_str(&format!(
            r#"<form method="post" action="{}"><button class="grape"{batch_disabled}>{batch_label}</button></form>"#,
            action(page, "analyze-batch")
        ));
        out.push_str(&format!(
            r#"<form method="post" action="{}"><button class="secondary">Select All</button></form>"#,
            action(page, "select-all")
        ));
        out.push_str(&format!(
            r#"<form method="post" action="{}"><button class="secondary">Clear Selection</button></form>"#,
            action(page, "select-clear")
        ));
    }

    out.push_str(&format!(
        r#"<form method="post" action="{}"><button class="secondary">Refresh</button></form>"#,
        action(page, "refresh")
    ));
    if let Some(loaded) = snapshot.last_loaded {
        out.push_str(&format!(
            "<span class=\"dimmed\">Updated {}</span>",
            loaded.format("%H:%M:%S UTC")
        ));
    }
    out.push_str("\n</div>\n");
    out
}
// endregion: --- Toolbar

// region:    --- Card
fn render_card(snapshot: &PageSnapshot, auction: &Auction) -> String {
    let page = snapshot.page;
    let id = auction.id;
    let selected = snapshot.selection.contains(id);
    let title = escape_html(&auction.title);

    let estimate = auction
        .estimated_value
        .map(|value| {
            let profit = ProfitEstimate::compute(&auction.price, value)
                .map(|estimate| render_profit(&estimate))
                .unwrap_or_default();
            format!(
                r#"<div class="row"><span class="badge estimate">Estimated Value: {}</span>{profit}</div>"#,
                format_usd(value)
            )
        })
        .unwrap_or_default();

    let analysis = match auction.analysis.as_deref() {
        Some(text) => escape_html(&truncate(text, 220)),
        None => "No analysis yet.".to_string(),
    };

    let mut buttons = String::new();
    if page == Page::Dashboard {
        let select_label = if selected { "Deselect" } else { "Select" };
        buttons.push_str(&format!(
            r#"<form method="post" action="{}"><button class="secondary">{select_label}</button></form>"#,
            action(page, &format!("select/{id}"))
        ));
    }
    let (analyze_label, analyze_disabled) = if snapshot.activity.analyzing.contains(&id) {
        ("Analyzing...", " disabled")
    } else if auction.is_analyzed() {
        ("Re-analyze", "")
    } else {
        ("Analyze", "")
    };
    buttons.push_str(&format!(
        r#"<form method="post" action="{}"><button class="grape"{analyze_disabled}>{analyze_label}</button></form>"#,
        action(page, &format!("analyze/{id}"))
    ));
    buttons.push_str(&render_watchlist_button(snapshot, auction));
    buttons.push_str(&format!(
        r#"<form method="post" action="{}"><button class="secondary">Details</button></form>"#,
        action(page, &format!("open/{id}"))
    ));

    let class = if selected { "card selected" } else { "card" };
    format!(
        r#"<div class="{class}">
  <img src="{image}" alt="{title}" />
  <strong>{title}</strong>
  <div><span class="badge price">{price}</span></div>
  {estimate}
  <p class="dimmed">{analysis}</p>
  <div class="row">
    <a href="{url}" target="_blank" rel="noopener noreferrer">View Auction</a>
    <div>{buttons}</div>
  </div>
</div>
"#,
        image = escape_html(&auction.image_url),
        price = escape_html(&auction.price),
        url = escape_html(&auction.auction_url),
    )
}

pub(super) fn render_profit(estimate: &ProfitEstimate) -> String {
    let class = if estimate.is_gain() { "gain" } else { "loss" };
    format!(
        r#"<span class="{class}">Profit {} ({})</span>"#,
        format_usd(estimate.profit),
        estimate.percent_label()
    )
}

pub(super) fn render_watchlist_button(snapshot: &PageSnapshot, auction: &Auction) -> String {
    let id = auction.id;
    let label = if snapshot.activity.toggling.contains(&id) {
        "Updating..."
    } else if auction.is_watchlisted {
        "★ Remove from Watchlist"
    } else {
        "☆ Add to Watchlist"
    };
    format!(
        r#"<form method="post" action="{}"><button class="secondary">{label}</button></form>"#,
        action(snapshot.page, &format!("watchlist/{id}"))
    )
}
// endregion: --- Card
