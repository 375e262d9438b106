//! Home Page
//!
//! Dashboard counters and the most recent visits.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::models::DashboardStats;

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app_context();
    let (stats, set_stats) = signal(DashboardStats::default());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::dashboard_stats().await {
                Ok(fetched) => set_stats.set(fetched),
                Err(err) => ctx.notify_error(err.to_string()),
            }
        });
    });

    view! {
        <div class="page">
            <h1>"Dashboard"</h1>

            <div class="stat-row">
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().total_children}</span>
                    <span class="stat-label">"Children"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().total_visits}</span>
                    <span class="stat-label">"Visits"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().total_users}</span>
                    <span class="stat-label">"Staff"</span>
                </div>
            </div>

            <h2>"Recent visits"</h2>
            {move || {
                let recent = stats.get().recent_visits;
                if recent.is_empty() {
                    view! { <p class="empty-state">"No visits recorded yet."</p> }.into_any()
                } else {
                    view! {
                        <ul class="recent-visits">
                            {recent.into_iter().map(|visit| view! {
                                <li>
                                    <span>{visit.child_name.unwrap_or_else(|| "Unknown child".into())}</span>
                                    <span class="visit-date">{visit.visit_date}</span>
                                    {visit.user_name.map(|name| view! {
                                        <span class="visit-user">{name}</span>
                                    })}
                                </li>
                            }).collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
