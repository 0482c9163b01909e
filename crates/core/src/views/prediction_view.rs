use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::chart::ChartPayload;
use crate::models::forecast::{
    DailyPrediction, ForecastSummary, MetricsDisplay, NormalizedForecast, PredictionRequest,
    PredictionResponse,
};
use crate::services::chart_service::ChartService;
use crate::services::forecast_service::ForecastService;

/// Everything derived from one prediction response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSnapshot {
    pub response: PredictionResponse,
    pub forecast: NormalizedForecast,
    pub summary: ForecastSummary,
    pub metrics: MetricsDisplay,
    pub daily: Vec<DailyPrediction>,
    pub chart: ChartPayload,
}

/// State of the prediction tab.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictionView {
    pub last_request: Option<PredictionRequest>,
    pub snapshot: Option<ForecastSnapshot>,
    pub show_daily_details: bool,
    pub error: Option<String>,
}

impl PredictionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a fresh snapshot from `response`.
    ///
    /// A response without predictions clears the snapshot (nothing is
    /// rendered). A response that cannot be normalized keeps the previous
    /// snapshot and records the error.
    pub fn apply_response(
        &mut self,
        response: PredictionResponse,
        reference_date: NaiveDate,
        forecast_service: &ForecastService,
        chart_service: &ChartService,
    ) -> Result<(), CoreError> {
        if !response.has_predictions() {
            self.snapshot = None;
            self.error = None;
            return Ok(());
        }

        match build_snapshot(response, reference_date, forecast_service, chart_service) {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn record_error(&mut self, error: &CoreError) {
        self.error = Some(error.to_string());
    }

    pub fn toggle_daily_details(&mut self) {
        self.show_daily_details = !self.show_daily_details;
    }
}

fn build_snapshot(
    response: PredictionResponse,
    reference_date: NaiveDate,
    forecast_service: &ForecastService,
    chart_service: &ChartService,
) -> Result<ForecastSnapshot, CoreError> {
    let forecast =
        forecast_service.normalize(&response.historical, &response.predictions, reference_date)?;
    let summary = forecast_service.summary(&forecast, &response.predictions)?;
    let daily = forecast_service.daily_breakdown(&forecast, &response.historical, &response.predictions);
    let chart = chart_service.build_forecast_chart(&forecast, &response.historical, &response.predictions);
    let metrics = MetricsDisplay::from_metrics(response.metrics.as_ref());

    Ok(ForecastSnapshot {
        response,
        forecast,
        summary,
        metrics,
        daily,
        chart,
    })
}
