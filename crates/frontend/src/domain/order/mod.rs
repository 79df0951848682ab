pub mod ui;

use contracts::domain::order::OrderStatus;
use contracts::shared::select::SelectOption;

pub const ENDPOINT: &str = "/api/orders";

pub fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Новый",
        OrderStatus::Confirmed => "Подтверждён",
        OrderStatus::Shipped => "Отправлен",
        OrderStatus::Delivered => "Доставлен",
        OrderStatus::Cancelled => "Отменён",
    }
}

pub fn status_options() -> Vec<SelectOption> {
    OrderStatus::ALL
        .iter()
        .map(|status| SelectOption::new(status.as_str(), status_label(*status)))
        .collect()
}
