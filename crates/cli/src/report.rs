use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use prophet_dashboard_core::services::chart_service::weekday_label;
use prophet_dashboard_core::views::prediction_view::PredictionView;
use prophet_dashboard_core::Dashboard;

pub fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn prediction(view: &PredictionView) -> Value {
    let Some(snapshot) = view.snapshot.as_ref() else {
        return json!({ "message": "no predictions returned" });
    };

    let daily: Vec<Value> = snapshot
        .daily
        .iter()
        .map(|d| {
            json!({
                "date": weekday_label(d.date),
                "price": d.price,
                "changePct": d.change_pct,
                "range": [d.lower, d.upper],
            })
        })
        .collect();

    json!({
        "ticker": snapshot.response.ticker,
        "summary": snapshot.summary,
        "metrics": snapshot.metrics,
        "daily": daily,
        "chart": snapshot.chart,
    })
}

pub fn social(dashboard: &Dashboard) -> Value {
    let view = dashboard.social();
    let sentiment = dashboard.sentiment_service();
    let summary = view.summary.map(|s| {
        json!({
            "average": s.average,
            "score": sentiment.score(s.average),
            "trend": s.trend,
            "label": s.trend.label(),
            "change24h": sentiment.change_24h_label(&s),
        })
    });

    json!({
        "ticker": view.ticker,
        "summary": summary,
        "history": view.history_chart,
        "posts": view.posts,
        "nextUpdate": view.policy.countdown_label(Utc::now()),
    })
}

pub fn market(dashboard: &Dashboard, now: DateTime<Utc>) -> Value {
    let view = dashboard.market();
    json!({
        "snapshot": view.snapshot,
        "lastUpdated": view.last_updated_label(now, dashboard.market_service()),
        "error": view.error,
    })
}
