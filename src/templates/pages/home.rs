// templates/pages/home.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

const SAMPLE_SUBMISSION: &str = r#"{"property_type": "single_family", "neighborhood": "CollgCr", "bedrooms": 3, "bathrooms": 2.5, "living_area": 1800, "lot_area": 9000, "year_built": 1999, "overall_quality": 7, "overall_condition": 5}"#;

pub struct HomeVm {
    pub model_name: String,
    pub model_version: String,
    /// Largest first.
    pub importances: Vec<(String, f64)>,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    desktop_layout(
        "Home",
        false,
        html! {
            main class="container" {
                h1 { "Residential price estimates" }
                p {
                    "Estimates come from " strong { (vm.model_name) } " v" (vm.model_version)
                    ", trained on the Ames housing dataset."
                }

                (card("Bulk predictions", html! {
                    p { "POST a CSV with the dataset's 79 columns (an " code { "Id" } " column is optional):" }
                    pre { "curl --data-binary @test.csv http://localhost:3000/model-prediction" }
                    p { "Add " code { "?format=xlsx" } " for a spreadsheet. An empty body returns a single test prediction." }
                }))

                (card("Single property", html! {
                    p { "POST JSON to " code { "/api/submissions" } ":" }
                    pre { (SAMPLE_SUBMISSION) }
                }))

                @if !vm.importances.is_empty() {
                    (card("What drives the estimate", html! {
                        table style="border-collapse: collapse;" {
                            @for (feature, weight) in &vm.importances {
                                tr {
                                    td style="padding: 4px 12px 4px 0;" { (feature) }
                                    td style="padding: 4px 0;" { (format!("{:.0}%", weight * 100.0)) }
                                }
                            }
                        }
                    }))
                }
            }
        },
    )
}
