pub mod u901_export_workbook;
