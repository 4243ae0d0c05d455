use gtk4 as gtk;
use gtk4::prelude::*;

use crate::storage::RoomEntry;
use crate::team::TEAM;

/// Left panel: teammate roster, the rolling project summary, and rooms
/// remembered from earlier sessions.
pub struct Sidebar {
    root: gtk::Box,
    summary: gtk::Label,
    rooms_list: gtk::ListBox,
}

fn heading(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class("heading");
    label.set_halign(gtk::Align::Start);
    label
}

impl Sidebar {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);
        root.set_width_request(240);

        root.append(&heading("Team"));
        let team_list = gtk::ListBox::new();
        for member in TEAM {
            let row = gtk::ListBoxRow::new();
            let cell = gtk::Box::new(gtk::Orientation::Vertical, 2);
            cell.set_margin_top(6);
            cell.set_margin_bottom(6);
            cell.set_margin_start(8);
            cell.set_margin_end(8);

            let name = gtk::Label::new(Some(member.name));
            name.set_halign(gtk::Align::Start);
            let role = gtk::Label::new(Some(member.role));
            role.add_css_class("dim-label");
            role.set_halign(gtk::Align::Start);

            cell.append(&name);
            cell.append(&role);
            row.set_child(Some(&cell));
            team_list.append(&row);
        }
        root.append(&team_list);

        root.append(&heading("Project Summary"));
        let summary = gtk::Label::new(Some("(no summary yet)"));
        summary.add_css_class("dim-label");
        summary.set_halign(gtk::Align::Start);
        summary.set_wrap(true);
        summary.set_xalign(0.0);
        root.append(&summary);

        root.append(&heading("Recent Rooms"));
        let rooms_list = gtk::ListBox::new();
        root.append(&rooms_list);

        Self {
            root,
            summary,
            rooms_list,
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn set_summary(&self, text: &str) {
        if text.trim().is_empty() {
            self.summary.set_label("(no summary yet)");
        } else {
            self.summary.set_label(text);
        }
    }

    pub fn set_rooms(&self, rooms: &[RoomEntry]) {
        while let Some(child) = self.rooms_list.first_child() {
            self.rooms_list.remove(&child);
        }
        for room in rooms {
            let row = gtk::ListBoxRow::new();
            let label = gtk::Label::new(Some(&room.name));
            label.set_margin_top(6);
            label.set_margin_bottom(6);
            label.set_margin_start(8);
            label.set_margin_end(8);
            label.set_halign(gtk::Align::Start);
            row.set_child(Some(&label));
            self.rooms_list.append(&row);
        }
    }
}
