pub mod send_contact_message;
