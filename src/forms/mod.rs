pub mod campaigns;
