use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::client::ApiClient;
use crate::app::AppState;
use crate::dispatch::MessageDispatcher;
use crate::session::RoomSession;
use crate::sync::{self, PollGate};
use crate::ui::chat_view::ChatView;
use crate::ui::sidebar::Sidebar;

pub fn show_main_window(app: &Application) {
    let state = AppState::load();
    let client = ApiClient::new(&state.base_url);

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Parallel OS")
        .default_width(960)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();

    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    let sidebar = Rc::new(Sidebar::new());
    split.set_flap(Some(&sidebar.widget()));

    let chat = Rc::new(ChatView::new());
    split.set_content(Some(&chat.widget()));
    chat.set_enabled(false);

    overlay.set_child(Some(&split));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    header.set_title_widget(Some(&gtk::Label::new(Some("Parallel OS"))));
    let memory_btn = gtk::Button::with_label("Ask Memory");
    memory_btn.add_css_class("suggested-action");
    memory_btn.set_sensitive(false);
    header.pack_end(&memory_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));
    window.present();

    match crate::storage::recent_rooms(20) {
        Ok(rooms) => sidebar.set_rooms(&rooms),
        Err(err) => tracing::warn!("could not read cached rooms: {err}"),
    }

    let session = Rc::new(RefCell::new(RoomSession::default()));
    let gate = Rc::new(PollGate::default());
    let poll_source: Rc<RefCell<Option<glib::SourceId>>> = Rc::new(RefCell::new(None));

    // One polling tick. The gate turns the timer away while an earlier
    // tick's requests are still settling, so ticks never overlap.
    let run_tick: Rc<dyn Fn()> = {
        let client = client.clone();
        let session = session.clone();
        let gate = gate.clone();
        let chat = chat.clone();
        let sidebar = sidebar.clone();
        Rc::new(move || {
            let Some(room_id) = session.borrow().room_id().map(str::to_string) else {
                return;
            };
            if !gate.try_begin() {
                return;
            }
            let client = client.clone();
            let rx = crate::utils::run_async_to_main(async move {
                sync::poll_once(&client, &room_id).await
            });
            let gate = gate.clone();
            let chat = chat.clone();
            let sidebar = sidebar.clone();
            rx.attach(None, move |res| {
                gate.finish();
                match res {
                    Ok(update) => {
                        chat.set_messages(&update.messages);
                        if let Some(memory) = &update.memory {
                            chat.set_memory(memory);
                        }
                        sidebar.set_summary(&update.project_summary);
                    }
                    Err(err) => tracing::warn!("poll failed, retrying next tick: {err}"),
                }
                glib::ControlFlow::Continue
            });
        })
    };

    // Create the room once at startup. Until it resolves, the command bar
    // stays disabled; if it fails, it stays disabled for good.
    {
        let client = client.clone();
        let room_name = state.room_name.clone();
        let rx = crate::utils::run_async_to_main(async move {
            client.create_room(&room_name).await
        });

        let session = session.clone();
        let chat = chat.clone();
        let sidebar = sidebar.clone();
        let overlay = overlay.clone();
        let memory_btn = memory_btn.clone();
        let run_tick = run_tick.clone();
        let poll_source = poll_source.clone();
        rx.attach(None, move |res| {
            match res {
                Ok(created) => {
                    if session.borrow_mut().activate(&created) {
                        if let Err(err) = crate::storage::remember_room(&created) {
                            tracing::warn!("could not cache room: {err}");
                        }
                        if let Ok(rooms) = crate::storage::recent_rooms(20) {
                            sidebar.set_rooms(&rooms);
                        }
                        chat.set_enabled(true);
                        memory_btn.set_sensitive(true);

                        run_tick();
                        let tick = run_tick.clone();
                        let id = glib::timeout_add_local(sync::POLL_INTERVAL, move || {
                            tick();
                            glib::ControlFlow::Continue
                        });
                        *poll_source.borrow_mut() = Some(id);
                    } else {
                        tracing::error!("room creation returned a blank id");
                        overlay.add_toast(adw::Toast::new("Server returned a room without an id."));
                    }
                }
                Err(err) => {
                    session.borrow_mut().fail();
                    tracing::error!("room creation failed: {err}");
                    overlay.add_toast(adw::Toast::new(&format!("Could not create room: {err}")));
                }
            }
            glib::ControlFlow::Continue
        });
    }

    // Submissions: single-flight, cleared optimistically, restored on
    // failure. The reply shows up through the next poll tick.
    let dispatcher = Rc::new(MessageDispatcher::new(state.user_id(), state.user_name.clone()));
    {
        let chat_for_submit = chat.clone();
        let client = client.clone();
        let session = session.clone();
        let dispatcher = dispatcher.clone();
        let overlay = overlay.clone();
        chat.connect_submit(move || {
            let Some(room_id) = session.borrow().room_id().map(str::to_string) else {
                return;
            };
            let Some(request) = dispatcher.begin(
                &chat_for_submit.input_text(),
                chat_for_submit.selected_mode(),
                chat_for_submit.selected_target().as_deref(),
            ) else {
                return;
            };
            chat_for_submit.set_input_text("");
            chat_for_submit.set_send_enabled(false);

            let client = client.clone();
            let rx = crate::utils::run_async_to_main(async move {
                client.ask(&room_id, &request).await.map(|_| ())
            });

            let chat = chat_for_submit.clone();
            let dispatcher = dispatcher.clone();
            let overlay = overlay.clone();
            rx.attach(None, move |res| {
                chat.set_send_enabled(true);
                match res {
                    Ok(()) => dispatcher.succeed(),
                    Err(err) => {
                        if let Some(draft) = dispatcher.fail() {
                            chat.set_input_text(&draft);
                        }
                        overlay.add_toast(adw::Toast::new(&format!("Send failed: {err}")));
                    }
                }
                glib::ControlFlow::Continue
            });
        });
    }

    // Ask the shared memory; the answer never touches the transcript.
    {
        let window = window.clone();
        let overlay = overlay.clone();
        let client = client.clone();
        let session = session.clone();
        let user_name = state.user_name.clone();
        memory_btn.connect_clicked(move |_| {
            let Some(room_id) = session.borrow().room_id().map(str::to_string) else {
                return;
            };
            open_memory_dialog(&window, &overlay, &client, room_id, user_name.clone());
        });
    }

    // Stop polling when the window goes away. In-flight requests are not
    // aborted; their results land in a dead channel.
    {
        let poll_source = poll_source.clone();
        window.connect_close_request(move |_| {
            if let Some(id) = poll_source.borrow_mut().take() {
                id.remove();
            }
            glib::Propagation::Proceed
        });
    }
}

fn open_memory_dialog(
    window: &adw::ApplicationWindow,
    overlay: &adw::ToastOverlay,
    client: &ApiClient,
    room_id: String,
    user_name: String,
) {
    let dialog = gtk::Dialog::builder()
        .title("Ask the shared memory")
        .transient_for(window)
        .modal(true)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let info = gtk::Label::new(Some("The answer is drawn from the rolling team memory:"));
    info.set_halign(gtk::Align::Start);
    content.append(&info);

    let entry = gtk::Entry::new();
    entry.set_placeholder_text(Some("What changed since this morning?"));
    entry.set_hexpand(true);
    content.append(&entry);

    dialog.content_area().append(&content);
    let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
    let ask_btn = dialog.add_button("Ask", gtk::ResponseType::Ok);
    ask_btn.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);

    let window = window.clone();
    let overlay = overlay.clone();
    let client = client.clone();
    dialog.connect_response(move |dlg, resp| {
        if resp == gtk::ResponseType::Ok {
            let question = entry.text().trim().to_string();
            if question.is_empty() {
                overlay.add_toast(adw::Toast::new("Type a question first."));
                dlg.close();
                return;
            }
            let client = client.clone();
            let room_id = room_id.clone();
            let user_name = user_name.clone();
            let rx = crate::utils::run_async_to_main(async move {
                client.query_memory(&room_id, &question, &user_name).await
            });
            let window = window.clone();
            let overlay = overlay.clone();
            rx.attach(None, move |res| {
                match res {
                    Ok(answer) => show_memory_answer(&window, &answer),
                    Err(err) => {
                        overlay.add_toast(adw::Toast::new(&format!("Memory query failed: {err}")));
                    }
                }
                glib::ControlFlow::Continue
            });
        }
        dlg.close();
    });

    dialog.present();
}

fn show_memory_answer(window: &adw::ApplicationWindow, answer: &str) {
    let dialog = gtk::Dialog::builder()
        .title("Shared memory")
        .transient_for(window)
        .modal(true)
        .default_width(420)
        .default_height(260)
        .build();

    let scroller = gtk::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .build();
    let label = gtk::Label::new(Some(answer));
    label.set_wrap(true);
    label.set_selectable(true);
    label.set_halign(gtk::Align::Start);
    label.set_valign(gtk::Align::Start);
    label.set_margin_top(12);
    label.set_margin_bottom(12);
    label.set_margin_start(12);
    label.set_margin_end(12);
    scroller.set_child(Some(&label));
    dialog.content_area().append(&scroller);

    let _ = dialog.add_button("Close", gtk::ResponseType::Close);
    dialog.connect_response(|dlg, _| dlg.close());
    dialog.present();
}
