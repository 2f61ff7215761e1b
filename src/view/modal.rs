// region:    --- Imports
use super::page::{action, render_profit, render_watchlist_button};
use super::{escape_html, format_usd};
use crate::auction::analysis::parse_analysis;
use crate::auction::model::{Auction, MarketResearch};
use crate::auction::profit::ProfitEstimate;
use crate::store::PageSnapshot;

// endregion: --- Imports

/// 상세 모달 렌더링
pub(super) fn render_modal(snapshot: &PageSnapshot, auction: &Auction) -> String {
    let title = escape_html(&auction.title);

    let images = auction
        .images()
        .into_iter()
        .map(|src| format!(r#"<img src="{}" alt="{title}" />"#, escape_html(src)))
        .collect::<String>();

    let estimate = auction
        .estimated_value
        .map(|value| {
            let profit = ProfitEstimate::compute(&auction.price, value)
                .map(|estimate| render_profit(&estimate))
                .unwrap_or_default();
            format!(
                r#"<span class="badge estimate">Estimated: {}</span>{profit}"#,
                format_usd(value)
            )
        })
        .unwrap_or_default();

    let metadata = render_metadata(auction);
    let analysis = render_analysis(auction);
    let research = render_research(snapshot, auction.id);
    let watchlist = render_watchlist_button(snapshot, auction);

    format!(
        r#"<div class="overlay">
  <div class="modal">
    <div class="row">
      <h3>{title}</h3>
      <form method="post" action="{close}"><button class="secondary">Close</button></form>
    </div>
    <div class="images">{images}</div>
    <div class="row"><span class="badge price">{price}</span>{estimate}</div>
    {metadata}
    {analysis}
    {research}
    <div class="row">
      <a href="{url}" target="_blank" rel="noopener noreferrer">View on ShopGoodwill</a>
      {watchlist}
    </div>
  </div>
</div>
"#,
        close = action(snapshot.page, "close"),
        price = escape_html(&auction.price),
        url = escape_html(&auction.auction_url),
    )
}

fn render_metadata(auction: &Auction) -> String {
    let mut rows = Vec::new();
    if let Some(seller) = &auction.seller {
        rows.push(format!("<div>Seller: {}</div>", escape_html(seller)));
    }
    if let Some(num_bids) = auction.num_bids {
        rows.push(format!("<div>Bids: {num_bids}</div>"));
    }
    if let Some(description) = &auction.description {
        rows.push(format!(
            r#"<div class="dimmed analysis">{}</div>"#,
            escape_html(description)
        ));
    }
    rows.join("\n")
}

/// 분석 텍스트는 품목 표와 요약으로 나눠서 보여준다
fn render_analysis(auction: &Auction) -> String {
    let Some(text) = auction.analysis.as_deref() else {
        return String::new();
    };
    let parsed = parse_analysis(Some(text));

    let mut out = String::from("<h4>Analysis:</h4>\n");
    if !parsed.items.is_empty() {
        out.push_str("<table><thead><tr><th>Item</th><th>Value</th></tr></thead><tbody>\n");
        for item in &parsed.items {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(&item.description),
                format_usd(item.value)
            ));
        }
        out.push_str(&format!(
            "<tr><td><strong>Total</strong></td><td><strong>{}</strong></td></tr>\n",
            format_usd(parsed.items_total())
        ));
        out.push_str("</tbody></table>\n");
    }
    let summary = parsed.summary.trim();
    if !summary.is_empty() {
        out.push_str(&format!(
            r#"<div class="analysis">{}</div>"#,
            escape_html(summary)
        ));
    }
    out
}

fn render_research(snapshot: &PageSnapshot, auction_id: i64) -> String {
    if snapshot.activity.researching == Some(auction_id) {
        return r#"<p class="dimmed">Loading market research…</p>"#.to_string();
    }
    match snapshot.research_for(auction_id) {
        Some(entry) => match &entry.market_research {
            Some(research) => render_market_research(research),
            None => r#"<p class="dimmed">No market research cached for this auction.</p>"#
                .to_string(),
        },
        None => String::new(),
    }
}

fn render_market_research(research: &MarketResearch) -> String {
    let summary = &research.price_summary;
    let recommendations = &research.recommendations;
    let mut out = String::from("<h4>Market Research</h4>\n<table><tbody>\n");

    let mut row = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            out.push_str(&format!(
                "<tr><th>{label}</th><td>{}</td></tr>\n",
                escape_html(&value)
            ));
        }
    };
    row("Value range", summary.estimated_value_range.clone());
    row("Average", summary.average_value.map(format_usd));
    row("Confidence", summary.confidence.clone());
    row("Data points", summary.data_points.map(|n| n.to_string()));
    row("List at", recommendations.list_price.clone());
    row("Accept offers above", recommendations.accept_offers_above.clone());
    row("Quick sale", recommendations.quick_sale_price.clone());
    row("Strategy", recommendations.strategy.clone());
    out.push_str("</tbody></table>\n");

    let notes: Vec<&String> = research
        .market_insights
        .iter()
        .chain(recommendations.key_factors.iter())
        .collect();
    if !notes.is_empty() {
        out.push_str("<ul>\n");
        for note in notes {
            out.push_str(&format!("<li>{}</li>\n", escape_html(note)));
        }
        out.push_str("</ul>\n");
    }
    out
}
