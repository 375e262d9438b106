//! Visit Dialog Component
//!
//! The "record a visit" dialog: notes, the opt-in location capture surface,
//! and the two submit actions. All transition rules live in `workflow`; this
//! component wires them to signals and the API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::map_view::{MapMarker, MapView, DEFAULT_ZOOM};
use crate::context::use_app_context;
use crate::models::{Child, Coordinate, DEFAULT_CENTER};
use crate::store::use_visit_queue;
use crate::workflow::{
    settle_successful_visit, DialogPhase, SubmitMode, VisitDraft, VisitOrigin,
};

#[component]
pub fn VisitDialog(
    child: Child,
    origin: VisitOrigin,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let queue = use_visit_queue();

    let child_id = child.id;
    let child_location = child.location();
    let full_name = child.full_name.clone();

    let (notes, set_notes) = signal(String::new());
    let (capture_on, set_capture_on) = signal(false);
    let (captured, set_captured) = signal(None::<Coordinate>);
    let (persist, set_persist) = signal(false);
    let phase = RwSignal::new(DialogPhase::default());

    // Map starts at the child's last known location when there is one.
    let (map_center, set_map_center) = signal(child_location.unwrap_or(DEFAULT_CENTER));

    let child_markers = {
        let full_name = full_name.clone();
        Signal::derive(move || {
            child_location
                .map(|position| {
                    vec![MapMarker {
                        position,
                        label: full_name.clone(),
                    }]
                })
                .unwrap_or_default()
        })
    };

    let on_pick = Callback::new(move |coord: Coordinate| {
        set_captured.set(Some(coord));
        set_map_center.set(coord);
    });

    let submit = move |mode: SubmitMode| {
        if !phase.try_update(|p| p.begin_submit()).unwrap_or(false) {
            return;
        }
        let draft = VisitDraft {
            child_id,
            notes: notes.get_untracked(),
            captured: if capture_on.get_untracked() {
                captured.get_untracked()
            } else {
                None
            },
            persist_to_child: persist.get_untracked(),
        };
        let body = draft.payload(mode);
        let queue = queue.clone();
        spawn_local(async move {
            match api::create_visit(&body).await {
                Ok(()) => {
                    settle_successful_visit(&queue, origin, child_id);
                    if origin == VisitOrigin::Queue {
                        ctx.queue_changed();
                    }
                    on_close.run(());
                    ctx.notify_success("Visit recorded");
                    ctx.reload();
                }
                Err(err) => {
                    // keep the draft; the user can edit and retry
                    ctx.notify_error(err.to_string());
                    phase.update(|p| p.finish_submit());
                }
            }
        });
    };

    let submit_skip = {
        let submit = submit.clone();
        move |_| submit(SubmitMode::SkipLocation)
    };
    let submit_record = move |_| submit(SubmitMode::WithLocation);

    let submitting = move || phase.get() == DialogPhase::Submitting;
    let record_disabled = move || submitting() || (capture_on.get() && captured.get().is_none());

    view! {
        <div class="dialog-backdrop">
            <div class="dialog">
                <div class="dialog-header">
                    <h2>"Record visit: " {full_name}</h2>
                    <button type="button" class="close-btn" on:click=move |_| on_close.run(())>
                        "\u{00D7}"
                    </button>
                </div>

                <label class="checkbox-row">
                    <input
                        type="checkbox"
                        prop:checked=move || capture_on.get()
                        on:change=move |ev| set_capture_on.set(event_target_checked(&ev))
                    />
                    "Set location"
                </label>

                <Show when=move || capture_on.get()>
                    <p class="hint">"Tap the map or use your current location."</p>
                    <MapView
                        center=map_center
                        zoom=DEFAULT_ZOOM
                        markers=child_markers
                        selection={Signal::<Option<Coordinate>>::from(captured)}
                        on_pick=on_pick
                    />
                    <label class="checkbox-row">
                        <input
                            type="checkbox"
                            prop:checked=move || persist.get()
                            on:change=move |ev| set_persist.set(event_target_checked(&ev))
                        />
                        "Save this location to the child's record"
                    </label>
                </Show>

                <textarea
                    class="notes-input"
                    rows="4"
                    placeholder="Visit notes..."
                    prop:value=move || notes.get()
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                ></textarea>

                <div class="dialog-actions">
                    <button
                        type="button"
                        class="secondary-btn"
                        disabled=submitting
                        on:click=submit_skip
                    >
                        "Skip location"
                    </button>
                    <button
                        type="button"
                        class="primary-btn"
                        disabled=record_disabled
                        on:click=submit_record
                    >
                        {move || if submitting() { "Recording..." } else { "Record visit" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
