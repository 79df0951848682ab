use leptos::prelude::*;
use thaw::{Badge, BadgeAppearance, BadgeColor};

/// Colour for a status value shown in a list cell.
pub fn status_color(status: &str) -> BadgeColor {
    match status {
        "Active" | "Approved" | "Delivered" => BadgeColor::Success,
        "Pending" | "Confirmed" => BadgeColor::Warning,
        "Shipped" => BadgeColor::Informative,
        "Inactive" | "Rejected" | "Cancelled" => BadgeColor::Danger,
        _ => BadgeColor::Subtle,
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let color = status_color(&status);
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {status}
        </Badge>
    }
}

/// Active/Inactive badge for the `isActive` flag most dictionaries carry.
#[component]
pub fn ActiveBadge(active: bool) -> impl IntoView {
    let status = if active { "Active" } else { "Inactive" };
    view! { <StatusBadge status=status /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert!(matches!(status_color("Approved"), BadgeColor::Success));
        assert!(matches!(status_color("Cancelled"), BadgeColor::Danger));
        assert!(matches!(status_color("Something"), BadgeColor::Subtle));
    }
}
