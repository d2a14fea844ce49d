mod campaign_list;
mod contact_list;

pub use campaign_list::CampaignListView;
pub use contact_list::ContactListView;
