//! Database Models
//!
//! 实体定义 + Create/Update DTO。状态一律使用封闭枚举，
//! 杜绝自由字符串状态值。

pub mod serde_helpers;

pub mod billiard_table;
pub mod booking;
pub mod creditor;
pub mod expense;
pub mod menu_item;
pub mod payment;
pub mod promotion;
pub mod table_order;
pub mod table_session;

pub use billiard_table::{BilliardTable, BilliardTableCreate, BilliardTableUpdate, TableStatus};
pub use booking::{Booking, BookingCreate, BookingStatus, BookingUpdate};
pub use creditor::{CreditStatus, Creditor, CreditorPayment, CreditorRepay};
pub use expense::{Expense, ExpenseCreate, ExpenseUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemStatus, MenuItemUpdate};
pub use payment::{Payment, PaymentCreate, PaymentType};
pub use promotion::{Promotion, PromotionCreate, PromotionStatus, PromotionType, PromotionUpdate};
pub use table_order::{PlaceOrder, TableOrder};
pub use table_session::{
    ApplyPromotion, CloseSession, OpenSession, SessionStatus, TableSession, TableSessionDetail,
    TransferSession,
};
