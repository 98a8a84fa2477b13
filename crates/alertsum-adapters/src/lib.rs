pub mod mail;
pub mod render;
pub mod zabbix;
