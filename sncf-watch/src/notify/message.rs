//! Notification message rendering.
//!
//! Messages are Telegram-flavoured HTML, in French — this watcher's
//! audience buys tickets on sncf-connect.com.

use std::fmt::Write;

use crate::watch::{OfferEvent, OfferEventKind};

/// Static purchase link appended to every message.
const PURCHASE_URL: &str = "https://www.sncf-connect.com/";

/// Render one event as an HTML Telegram message.
pub fn render(event: &OfferEvent) -> String {
    let mut message = format!("<b>{}</b>\n", event.itinerary);

    match event.kind {
        OfferEventKind::NewProposal => {
            message.push_str("--- Nouvelle offre directe trouvée! ---\n");
        }
        OfferEventKind::UpdatedProposal => {
            let _ = writeln!(
                message,
                "--- Nouvelle(s) offre(s) pour le train de {} ---",
                event.proposal.departure.time_label
            );
        }
    }

    let _ = writeln!(
        message,
        "Depart : {} {}",
        event.proposal.departure.time_label, event.proposal.departure.date_label
    );
    let _ = writeln!(
        message,
        "Arrivée : {} {}",
        event.proposal.arrival.time_label, event.proposal.arrival.date_label
    );
    let _ = writeln!(message, "Duree : {}", event.proposal.duration_label);
    let _ = writeln!(message, "Type : {}", event.proposal.transporter_description);

    message.push_str("Offres :\n");
    for offer in &event.new_offers {
        let class_name = if offer.comfort_class.label.contains('1') {
            "1er classe"
        } else {
            "2de classe"
        };
        let _ = writeln!(message, "- {class_name} : {}", offer.price_label);
    }

    let _ = writeln!(
        message,
        "Lien pour achat: <a href=\"{PURCHASE_URL}\">SNCF Connect</a>"
    );
    message.push_str("------------------------------------");

    message
}
