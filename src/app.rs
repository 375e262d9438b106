//! Outreach Console App
//!
//! Root component: builds the shared services once, provides them through
//! context, and switches between pages.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{NavBar, Toast};
use crate::context::AppContext;
use crate::leaflet::MapEngine;
use crate::pages::{
    AcademicYearsPage, ChildDetailPage, ChildFormPage, ChildrenPage, ClassesPage, FindByAreaPage,
    HomePage, Page, VisitQueuePage, VisitationsPage,
};
use crate::store::{AppState, VisitQueue};

#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::Home);

    provide_context(AppContext::new());
    provide_context(Store::new(AppState::default()));
    provide_context(VisitQueue::local_storage());
    provide_context(MapEngine::detect());

    view! {
        <div class="app-layout">
            <NavBar current=page set_current=set_page />

            <main class="main-content">
                {move || match page.get() {
                    Page::Home => view! { <HomePage /> }.into_any(),
                    Page::Children => view! { <ChildrenPage set_page=set_page /> }.into_any(),
                    Page::ChildDetail(id) => {
                        view! { <ChildDetailPage id=id set_page=set_page /> }.into_any()
                    }
                    Page::ChildAdd => view! { <ChildFormPage set_page=set_page /> }.into_any(),
                    Page::ChildEdit(id) => {
                        view! { <ChildFormPage existing=id set_page=set_page /> }.into_any()
                    }
                    Page::VisitQueue => view! { <VisitQueuePage set_page=set_page /> }.into_any(),
                    Page::Visitations => view! { <VisitationsPage /> }.into_any(),
                    Page::FindByArea => view! { <FindByAreaPage set_page=set_page /> }.into_any(),
                    Page::Classes => view! { <ClassesPage /> }.into_any(),
                    Page::AcademicYears => view! { <AcademicYearsPage /> }.into_any(),
                }}
            </main>

            <Toast />
        </div>
    }
}
