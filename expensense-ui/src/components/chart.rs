//! Expense Chart
//!
//! Monthly expense line chart drawn by Chart.js, which the dashboard template
//! loads globally. Page scripts call `createExpenseChart(expenses)` with the
//! server's newest-first `{"Mon YYYY": total}` mapping and keep the returned
//! handle to redraw or tear the chart down.
//!
//! Object keys are read in JS iteration order, so integer-like labels would be
//! reordered by the engine before they reach us.

use leptos::logging::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use expensense::{ChartConfig, ClientError, ClientResult, ExpenseSeries, SeriesOrder};

use crate::dom::{self, describe_js_error, to_js_error};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(context: &CanvasRenderingContext2d, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method, js_class = "Chart")]
    fn destroy(this: &ChartJs);
}

/// Handle to a drawn expense chart. The owner decides when to tear it down.
#[wasm_bindgen]
pub struct ExpenseChart {
    canvas_id: String,
    points: usize,
    chart: Option<ChartJs>,
}

#[wasm_bindgen]
impl ExpenseChart {
    /// Tear the chart down, freeing the canvas for a new one
    pub fn destroy(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
    }

    /// Redraw on the same canvas with new data. Rejected data leaves the
    /// current chart in place.
    pub fn replace(&mut self, expenses: JsValue) -> Result<(), JsValue> {
        let series = expense_series(&expenses).map_err(to_js_error)?;
        let context = canvas_context(&self.canvas_id).map_err(to_js_error)?;

        self.destroy();
        self.chart = Some(draw(&context, &series).map_err(to_js_error)?);
        self.points = series.len();
        Ok(())
    }

    /// Number of months currently plotted
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> usize {
        self.points
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.chart.is_some()
    }
}

/// Draw the expense chart on the configured canvas
#[wasm_bindgen(js_name = createExpenseChart)]
pub fn create_expense_chart(expenses: JsValue) -> Result<ExpenseChart, JsValue> {
    let document = dom::document().map_err(to_js_error)?;
    let canvas_id = dom::page_config(&document).elements.chart_canvas;

    let series = expense_series(&expenses).map_err(to_js_error)?;
    let context = canvas_context(&canvas_id).map_err(to_js_error)?;
    let chart = draw(&context, &series).map_err(to_js_error)?;

    Ok(ExpenseChart {
        canvas_id,
        points: series.len(),
        chart: Some(chart),
    })
}

/// Read a `{label: amount}` object into chart order
pub fn expense_series(expenses: &JsValue) -> ClientResult<ExpenseSeries> {
    let object = expenses
        .dyn_ref::<js_sys::Object>()
        .filter(|_| !js_sys::Array::is_array(expenses))
        .ok_or_else(|| ClientError::Decode("expenses must be an object of month → amount".to_string()))?;

    let entries = js_sys::Object::entries(object)
        .iter()
        .map(|entry| -> ClientResult<(String, f64)> {
            let pair: js_sys::Array = entry.unchecked_into();
            let label = pair
                .get(0)
                .as_string()
                .ok_or_else(|| ClientError::Decode("non-string month label".to_string()))?;
            let amount = pair
                .get(1)
                .as_f64()
                .ok_or_else(|| ClientError::Decode(format!("amount for {} is not a number", label)))?;
            Ok((label, amount))
        })
        .collect::<ClientResult<Vec<_>>>()?;

    let series = ExpenseSeries::from_newest_first(entries);
    if let SeriesOrder::OutOfOrder { index, label } = series.check_order() {
        warn!(
            "Expense months are not newest-first; `{}` (position {}) is out of order after reversal",
            label, index
        );
    }

    Ok(series)
}

/// 2d context of the chart canvas
fn canvas_context(canvas_id: &str) -> ClientResult<CanvasRenderingContext2d> {
    let document = dom::document()?;
    let canvas: HtmlCanvasElement = dom::require_by_id(&document, canvas_id)?;

    canvas
        .get_context("2d")
        .map_err(|e| ClientError::Dom(describe_js_error(&e)))?
        .ok_or_else(|| ClientError::Dom(format!("#{} has no 2d context", canvas_id)))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ClientError::Dom(format!("#{} returned an unexpected context", canvas_id)))
}

fn draw(context: &CanvasRenderingContext2d, series: &ExpenseSeries) -> ClientResult<ChartJs> {
    let config = ChartConfig::expense_line(series).to_json()?;
    let config = js_sys::JSON::parse(&config).map_err(|e| ClientError::Decode(describe_js_error(&e)))?;

    ChartJs::new(context, &config)
        .map_err(|e| ClientError::Dom(format!("Chart.js failed: {}", describe_js_error(&e))))
}
