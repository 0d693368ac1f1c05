mod attribute_kind;
mod dataset_info;

pub use attribute_kind::AttributeKind;
pub use dataset_info::DatasetInfo;
