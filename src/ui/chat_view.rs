use gtk4 as gtk;
use gtk4::prelude::*;
use std::rc::Rc;

use crate::api::models::{MemorySnapshot, Message, Mode, Role};
use crate::team::TEAM;

/// Center panel: shared-memory bar, transcript, and the command bar with
/// routing mode, target teammate, input and send button.
pub struct ChatView {
    root: gtk::Box,
    scroller: gtk::ScrolledWindow,
    messages_box: gtk::Box,
    memory_label: gtk::Label,
    memory_chip: gtk::Label,
    entry: gtk::Entry,
    send_btn: gtk::Button,
    mode_dd: gtk::DropDown,
    teammate_dd: gtk::DropDown,
}

impl ChatView {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        // Shared memory bar
        let memory_bar = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let memory_title = gtk::Label::new(Some("Shared Memory:"));
        memory_title.add_css_class("heading");
        let memory_label = gtk::Label::new(Some("(empty — ask the team to propose a summary)"));
        memory_label.add_css_class("dim-label");
        memory_label.set_wrap(true);
        memory_label.set_xalign(0.0);
        memory_label.set_hexpand(true);
        let memory_chip = gtk::Label::new(Some("0 notes"));
        memory_chip.add_css_class("dim-label");
        memory_bar.append(&memory_title);
        memory_bar.append(&memory_label);
        memory_bar.append(&memory_chip);
        root.append(&memory_bar);

        // Transcript
        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
        scroller.set_child(Some(&messages_box));
        root.append(&scroller);

        // Command bar
        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let mode_dd = gtk::DropDown::from_strings(&["Self", "Teammate", "Ask Team"]);
        mode_dd.set_selected(2);
        let names: Vec<&str> = TEAM.iter().map(|m| m.name).collect();
        let teammate_dd = gtk::DropDown::from_strings(&names);
        teammate_dd.set_visible(false);
        {
            let teammate_dd = teammate_dd.clone();
            mode_dd.connect_selected_notify(move |dd| {
                teammate_dd.set_visible(dd.selected() != 2);
            });
        }

        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some("Ask something…"));
        let send_btn = gtk::Button::with_label("Send");
        send_btn.add_css_class("suggested-action");

        input_row.append(&mode_dd);
        input_row.append(&teammate_dd);
        input_row.append(&entry);
        input_row.append(&send_btn);
        root.append(&input_row);

        Self {
            root,
            scroller,
            messages_box,
            memory_label,
            memory_chip,
            entry,
            send_btn,
            mode_dd,
            teammate_dd,
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Replace the transcript wholesale with the latest poll result.
    pub fn set_messages(&self, messages: &[Message]) {
        while let Some(child) = self.messages_box.first_child() {
            self.messages_box.remove(&child);
        }
        for message in messages {
            let cell = gtk::Box::new(gtk::Orientation::Vertical, 2);
            cell.set_halign(match message.role {
                Role::User => gtk::Align::End,
                Role::Assistant | Role::System => gtk::Align::Start,
            });

            let sender = gtk::Label::new(Some(&message.sender_name));
            sender.add_css_class("dim-label");
            sender.set_halign(gtk::Align::Start);
            let content = gtk::Label::new(Some(&message.content));
            content.set_wrap(true);
            content.set_xalign(0.0);
            content.set_selectable(true);

            cell.append(&sender);
            cell.append(&content);
            self.messages_box.append(&cell);
        }
        // The new rows have no allocation yet; scroll once layout has
        // settled so `upper` reflects the appended content.
        let adj = self.scroller.vadjustment();
        glib::idle_add_local_once(move || {
            adj.set_value(adj.upper());
        });
    }

    pub fn set_memory(&self, memory: &MemorySnapshot) {
        if memory.memory_summary.trim().is_empty() {
            self.memory_label
                .set_label("(empty — ask the team to propose a summary)");
        } else {
            self.memory_label.set_label(&memory.memory_summary);
        }
        self.memory_chip
            .set_label(&format!("{} notes", memory.count));
    }

    /// Gate for the whole command bar; stays off until the room exists.
    pub fn set_enabled(&self, enabled: bool) {
        self.entry.set_sensitive(enabled);
        self.send_btn.set_sensitive(enabled);
        self.mode_dd.set_sensitive(enabled);
        self.teammate_dd.set_sensitive(enabled);
    }

    /// Gate for the send button alone, while a send is outstanding.
    pub fn set_send_enabled(&self, enabled: bool) {
        self.send_btn.set_sensitive(enabled);
    }

    pub fn input_text(&self) -> String {
        self.entry.text().to_string()
    }

    pub fn set_input_text(&self, text: &str) {
        self.entry.set_text(text);
    }

    pub fn selected_mode(&self) -> Mode {
        match self.mode_dd.selected() {
            0 => Mode::Self_,
            1 => Mode::Teammate,
            _ => Mode::Team,
        }
    }

    pub fn selected_target(&self) -> Option<String> {
        match self.selected_mode() {
            Mode::Team => None,
            Mode::Self_ | Mode::Teammate => TEAM
                .get(self.teammate_dd.selected() as usize)
                .map(|m| m.id.to_string()),
        }
    }

    /// Wire the send button and the entry's Enter key to one handler.
    pub fn connect_submit<F: Fn() + 'static>(&self, f: F) {
        let f: Rc<dyn Fn()> = Rc::new(f);
        {
            let f = f.clone();
            self.send_btn.connect_clicked(move |_| (f)());
        }
        self.entry.connect_activate(move |_| (f)());
    }
}
