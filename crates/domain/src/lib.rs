//! Domain layer of the delivery backend: entities, the order lifecycle,
//! filtering and reporting, all behind the storage traits in [`store`].

pub mod customer;
pub mod error;
pub mod order;
pub mod product;
pub mod report;
pub mod restaurant;
pub mod store;

pub use customer::{Customer, CustomerDraft, CustomerService};
pub use error::DomainError;
pub use order::{
    CreateOrder, CreateOrderItem, NewOrder, Order, OrderItem, OrderQuery, OrderService,
    OrderStatus,
};
pub use product::{Product, ProductDraft, ProductService};
pub use report::{PeriodReport, ReportService, SalesReportRow};
pub use restaurant::{Restaurant, RestaurantDraft, RestaurantService};
