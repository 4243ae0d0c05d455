use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use std::rc::Rc;

/// First-run window: collects the backend URL and a display name, persists
/// them, then hands off to the main window. The backend exposes no health
/// endpoint, so the first real probe is room creation in the main window.
pub fn show_setup_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Parallel OS Setup")
        .default_width(420)
        .default_height(260)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("Connect to Parallel OS"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let server_entry = gtk::Entry::new();
    server_entry.set_placeholder_text(Some("Backend URL (e.g. http://localhost:8000)"));
    server_entry.set_hexpand(true);

    let name_entry = gtk::Entry::new();
    name_entry.set_placeholder_text(Some("Display name"));
    name_entry.set_hexpand(true);

    let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
    form.append(&server_entry);
    form.append(&name_entry);
    root.append(&form);

    let connect_btn = gtk::Button::with_label("Connect");
    connect_btn.add_css_class("suggested-action");
    connect_btn.set_halign(gtk::Align::End);
    root.append(&connect_btn);

    toast_overlay.set_child(Some(&root));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    header.set_title_widget(Some(&gtk::Label::new(Some("Parallel OS"))));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let on_connect = {
        let app = app.clone();
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let server_entry = server_entry.clone();
        let name_entry = name_entry.clone();
        move || {
            let url = crate::utils::normalize_url(&server_entry.text());
            let name = name_entry.text().trim().to_string();
            if url.is_empty() || name.is_empty() {
                overlay.add_toast(adw::Toast::new(
                    "Please enter the backend URL and a display name.",
                ));
                return;
            }
            if url::Url::parse(&url).is_err() {
                overlay.add_toast(adw::Toast::new("That does not look like a valid URL."));
                return;
            }

            let mut state = crate::app::AppState::load();
            state.base_url = url;
            state.user_name = name;
            if let Err(err) = state.save() {
                overlay.add_toast(adw::Toast::new(&format!("Failed to save settings: {err}")));
                return;
            }
            crate::ui::main_window::show_main_window(&app);
            window.close();
        }
    };

    let on_connect: Rc<dyn Fn()> = Rc::new(on_connect);
    {
        let on_connect = on_connect.clone();
        connect_btn.connect_clicked(move |_| (on_connect)());
    }
    {
        let on_connect = on_connect.clone();
        server_entry.connect_activate(move |_| (on_connect)());
    }
    name_entry.connect_activate(move |_| (on_connect)());

    window.present();
}
