mod records;

pub use records::RecordTable;
