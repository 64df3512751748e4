use crate::{model::advert::SendEmailDto, server::model::user::User};

/// Contact request from a buyer to the seller of an advert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerInterestParam {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub buyer_name: String,
    pub message: String,
}

impl BuyerInterestParam {
    /// Builds the notification, falling back to the sender's account email and username
    /// when the request leaves `from` or `name` empty.
    pub fn from_dto(dto: SendEmailDto, sender: &User) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            to: dto.to,
            from: non_blank(dto.from).unwrap_or_else(|| sender.email.clone()),
            subject: dto.subject,
            buyer_name: non_blank(dto.name).unwrap_or_else(|| sender.username.clone()),
            message: dto.message,
        }
    }
}
