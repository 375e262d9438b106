//! Pages
//!
//! One module per screen. Navigation is a plain enum signal owned by the app
//! shell; pages receive the setter and move between each other with it.

mod academic_years;
mod child_detail;
mod child_form;
mod children;
mod classes;
mod find_by_area;
mod home;
mod visit_queue;
mod visitations;

pub use academic_years::AcademicYearsPage;
pub use child_detail::ChildDetailPage;
pub use child_form::ChildFormPage;
pub use children::ChildrenPage;
pub use classes::ClassesPage;
pub use find_by_area::FindByAreaPage;
pub use home::HomePage;
pub use visit_queue::VisitQueuePage;
pub use visitations::VisitationsPage;

use crate::models::ChildId;

/// The active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Children,
    ChildDetail(ChildId),
    ChildAdd,
    ChildEdit(ChildId),
    VisitQueue,
    Visitations,
    FindByArea,
    Classes,
    AcademicYears,
}

impl Page {
    /// Nav section this page highlights; child detail and forms belong to
    /// the children section.
    pub fn section(self) -> Page {
        match self {
            Page::ChildDetail(_) | Page::ChildAdd | Page::ChildEdit(_) => Page::Children,
            other => other,
        }
    }
}
