mod fuel_sale;
mod dashboard;
mod summary;

pub use fuel_sale::{
    CreateFuelSale, FuelSale, NewFuelSale, OpeningReading, OpeningReadingQuery, SaleUpdate,
    UpdateFuelSale, DEFAULT_RATE_PER_LITER,
};
pub use dashboard::{
    DashboardState, DashboardView, DateChange, EditInput, EditPreview, EditState, FormInput,
    SaleForm,
};
pub use summary::Summary;
