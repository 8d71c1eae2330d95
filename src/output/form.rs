use super::escape_html;

const EMPTY_TABLE: &str = r#"<table id="observations_table" class="display" style="width:100%"><thead><tr></tr></thead><tbody></tbody></table>"#;

pub(crate) fn render_fragment(data_json: &str, properties_json: &str) -> String {
    format!(
        r####"
<link rel='stylesheet' type='text/css' href='https://cdn.datatables.net/1.11.5/css/jquery.dataTables.min.css'>
<link rel='stylesheet' type='text/css' href='https://cdn.datatables.net/buttons/2.2.2/css/buttons.dataTables.min.css'>
<script src='https://code.jquery.com/jquery-3.5.1.js'></script>
<script src='https://cdn.datatables.net/1.11.5/js/jquery.dataTables.min.js'></script>
<script src='https://cdn.datatables.net/buttons/2.2.2/js/dataTables.buttons.min.js'></script>
<script src='https://cdnjs.cloudflare.com/ajax/libs/jszip/3.1.3/jszip.min.js'></script>
<script src='https://cdn.datatables.net/buttons/2.2.2/js/buttons.html5.min.js'></script>

<div class="form-container">
    <h3>Select Property</h3>
    <select class="property-select" id="property-select" onchange="updateTable()">
        <option value="">-- Select a property --</option>
    </select>
    <div id="table-output" style="margin-top: 20px;">
        {EMPTY_TABLE}
    </div>
</div>

<style>
    .form-container {{
        max-width: 1000px;
        margin: 20px auto;
        font-family: Arial, sans-serif;
    }}
    .property-select {{
        width: 100%;
        padding: 10px;
        font-size: 16px;
        border: 1px solid #ccc;
        border-radius: 4px;
        margin-bottom: 20px;
    }}
    table.display {{
        width: 100% !important;
        border-collapse: collapse;
    }}
    div.dt-buttons {{
        margin-bottom: 15px;
    }}
    #observations_table th, #observations_table td {{
        border: 1px solid #ddd;
        padding: 12px;
        text-align: left;
        font-size: 14px;
        word-wrap: break-word;
        max-width: 200px;
    }}
    #observations_table th {{
        background-color: #f5f5f5;
        font-weight: bold;
    }}
    #observations_table td {{
        background-color: #fff;
    }}
    .dataTables_wrapper .dataTables_filter input {{
        border: 1px solid #ccc;
        padding: 5px;
        margin-bottom: 10px;
    }}
    .dataTables_wrapper .dataTables_paginate .paginate_button {{
        padding: 5px 10px;
        margin: 0 2px;
        border: 1px solid #ccc;
        border-radius: 3px;
    }}
</style>

<script>
    const data = {data_json};
    const uniqueProperties = {properties_json};
    const emptyTable = '{EMPTY_TABLE}';

    const select = document.getElementById('property-select');
    uniqueProperties.forEach(prop => {{
        const option = document.createElement('option');
        option.value = prop;
        option.text = prop;
        select.appendChild(option);
    }});

    let dataTable;
    function initializeDataTable() {{
        if (dataTable) {{
            dataTable.clear().destroy();
        }}
        dataTable = $('#observations_table').DataTable({{
            dom: 'Bfrtip',
            buttons: ['csv', 'excel'],
            pageLength: 10,
            searching: true,
            ordering: true,
            destroy: true,
            scrollX: true,
            language: {{
                emptyTable: "No data available. Select a property to display data."
            }}
        }});
    }}

    $(document).ready(function() {{
        initializeDataTable();
    }});

    function updateTable() {{
        const selectedProperty = select.value;
        const output = document.getElementById('table-output');

        if (!selectedProperty) {{
            output.innerHTML = emptyTable;
            initializeDataTable();
            return;
        }}

        const filteredData = data.filter(row => row.propertyaltlabel === selectedProperty);

        window.selectedProperty = selectedProperty;
        window.filteredData = filteredData;
        localStorage.setItem('selectedProperty', selectedProperty);
        localStorage.setItem('filteredData', JSON.stringify(filteredData));

        if (filteredData.length === 0) {{
            output.innerHTML = emptyTable;
            initializeDataTable();
            return;
        }}

        // header comes from the first matching row
        const headers = Object.keys(filteredData[0]);
        let tableHTML = '<table id="observations_table" class="display" style="width:100%"><thead><tr>';
        headers.forEach(header => {{
            tableHTML += `<th>${{header}}</th>`;
        }});
        tableHTML += '</tr></thead><tbody>';
        filteredData.forEach(row => {{
            tableHTML += '<tr>';
            headers.forEach(header => {{
                tableHTML += `<td>${{row[header] ?? ''}}</td>`;
            }});
            tableHTML += '</tr>';
        }});
        tableHTML += '</tbody></table>';
        output.innerHTML = tableHTML;

        initializeDataTable();

        window.dispatchEvent(new Event('filteredDataUpdated'));
    }}
</script>
"####
    )
}

pub(crate) fn wrap_page(title: &str, fragment: &str) -> String {
    let title = escape_html(title);
    format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
</head>
<body>
{fragment}
</body>
</html>
"####
    )
}
