use crate::db::MarketInsights;
use crate::domain::{Submission, VerificationStatus};
use crate::templates::{desktop_layout, money};
use maud::{html, Markup};

pub struct AdminVm {
    pub submissions: Vec<Submission>,
    pub insights: MarketInsights,
}

const TH: &str = "padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;";
const TD: &str = "padding: 8px; border-bottom: 1px solid #f3f4f6;";
const ACTION: &str = "background: none; border: none; cursor: pointer; font-size: 0.9em; font-weight: 500; padding: 0 6px 0 0;";

fn status_badge(status: VerificationStatus) -> Markup {
    let colors = match status {
        VerificationStatus::Pending => "background: #fef3c7; color: #92400e;",
        VerificationStatus::Verified => "background: #d1fae5; color: #065f46;",
        VerificationStatus::Rejected => "background: #fee2e2; color: #991b1b;",
    };
    html! {
        span style=(format!("{colors} padding: 2px 6px; border-radius: 4px; font-size: 0.85em;")) {
            (status.as_str())
        }
    }
}

fn action_button(id: i64, action: &str, label: &str, color: &str) -> Markup {
    html! {
        form action=(format!("/admin/submissions/{id}/{action}")) method="post" style="display: inline; margin: 0;" {
            button type="submit" style=(format!("{ACTION} color: {color};")) { (label) }
        }
    }
}

fn optional_money(value: Option<f64>) -> String {
    value.map(money).unwrap_or_else(|| "-".to_string())
}

pub fn admin_page(vm: &AdminVm) -> Markup {
    let i = &vm.insights;
    desktop_layout(
        "Admin Dashboard",
        true,
        html! {
            main class="container" {
                h1 { "Admin Dashboard" }

                div class="card" {
                    h3 { "Overview" }
                    p {
                        (i.total_submissions) " submissions: "
                        (i.pending) " pending, " (i.verified) " verified, " (i.rejected) " rejected."
                    }
                    p {
                        "Average estimate " (optional_money(i.average_predicted_price))
                        " over " (i.priced) " priced submissions."
                        @if let Some(mae) = i.mean_absolute_error {
                            " Mean absolute error " (money(mae)) " against " (i.compared_sales) " known sales."
                        }
                    }
                }

                div class="card" {
                    h3 { "Property Submissions" }
                    @if vm.submissions.is_empty() {
                        p style="color: #6b7280; font-style: italic;" { "No submissions yet." }
                    } @else {
                        div style="overflow-x: auto;" {
                            table style="width: 100%; border-collapse: collapse; margin-top: 1rem;" {
                                thead {
                                    tr {
                                        th style=(TH) { "ID" }
                                        th style=(TH) { "Submitted" }
                                        th style=(TH) { "Address" }
                                        th style=(TH) { "Neighborhood" }
                                        th style=(TH) { "Beds / Baths" }
                                        th style=(TH) { "Living Area" }
                                        th style=(TH) { "Sale Price" }
                                        th style=(TH) { "Estimate" }
                                        th style=(TH) { "Status" }
                                        th style=(TH) { "Actions" }
                                    }
                                }
                                tbody {
                                    @for s in &vm.submissions {
                                        @let p = &s.form.property;
                                        tr {
                                            td style=(TD) { (s.id) }
                                            td style=(format!("{TD} color: #6b7280; font-size: 0.9em;")) {
                                                (s.submitted_at.format("%Y-%m-%d %H:%M").to_string())
                                            }
                                            td style=(TD) { (s.full_address()) }
                                            td style=(TD) { (p.neighborhood.as_deref().unwrap_or("-")) }
                                            td style=(TD) {
                                                (p.bedrooms.unwrap_or(0)) " / " (p.bathrooms.unwrap_or(0.0))
                                            }
                                            td style=(TD) { (p.living_area.unwrap_or(0)) " sqft" }
                                            td style=(TD) { (optional_money(s.form.sale_price)) }
                                            td style=(TD) { (optional_money(s.predicted_price)) }
                                            td style=(TD) { (status_badge(s.status)) }
                                            td style=(TD) {
                                                @if s.status != VerificationStatus::Verified {
                                                    (action_button(s.id, "verify", "Verify", "#059669"))
                                                }
                                                @if s.status != VerificationStatus::Pending {
                                                    (action_button(s.id, "pending", "Pending", "#d97706"))
                                                }
                                                @if s.status != VerificationStatus::Rejected {
                                                    (action_button(s.id, "reject", "Reject", "#dc2626"))
                                                }
                                                (action_button(s.id, "regenerate", "Regenerate", "#2563eb"))
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
