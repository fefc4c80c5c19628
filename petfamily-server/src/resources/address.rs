//! Address hierarchy: estado > cidade > bairro > logradouro > cep, endereco

use crate::models::{Consistency, Dependent, Field, FieldKind, Filter, FilterOp, Noun, ResourceSpec};

pub static STATE: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Estado",
        plural: "Estados",
        feminine: false,
    },
    path: "/estados",
    table: "estado",
    key: "id_estado",
    id_alias: "idEstado",
    fields: &[
        Field::new("nome", "nome", FieldKind::Text { min: 3, max: 30 })
            .required()
            .hint("O nome do estado deve ter entre 3 e 30 caracteres"),
        Field::new("sigla", "sigla", FieldKind::StateCode)
            .required()
            .hint("A sigla deve ter exatamente 2 letras"),
    ],
    required_message: "Nome e sigla são campos obrigatórios",
    select: r#"SELECT e.id_estado AS "idEstado", e.nome AS "nome", e.sigla AS "sigla"
        FROM estado e"#,
    order_by: &["nome"],
    filters: &[
        Filter {
            param: "sigla",
            alias: "sigla",
            op: FilterOp::Upper,
        },
        Filter {
            param: "nome",
            alias: "nome",
            op: FilterOp::Contains,
        },
    ],
    conflicts: &[
        ("sigla", "Já existe um estado com esta sigla"),
        ("nome", "Já existe um estado com este nome"),
    ],
    conflict_message: "Estado já cadastrado",
    dependents: &[Dependent {
        table: "cidade",
        column: "id_estado",
    }],
    in_use_message: "Não é possível excluir o estado pois existem cidades vinculadas a ele",
    checks: &[],
};

pub static CITY: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Cidade",
        plural: "Cidades",
        feminine: true,
    },
    path: "/cidades",
    table: "cidade",
    key: "id_cidade",
    id_alias: "idCidade",
    fields: &[
        Field::new("nome", "nome", FieldKind::Text { min: 1, max: 100 }).required(),
        Field::new("idEstado", "id_estado", FieldKind::Id)
            .required()
            .references(&STATE),
    ],
    required_message: "Nome e ID do estado são campos obrigatórios",
    select: r#"SELECT c.id_cidade AS "idCidade", c.nome AS "nome", c.id_estado AS "idEstado",
            e.nome AS "estado", e.sigla AS "sigla"
        FROM cidade c
        JOIN estado e ON e.id_estado = c.id_estado"#,
    order_by: &["nome"],
    filters: &[Filter {
        param: "estadoId",
        alias: "idEstado",
        op: FilterOp::Id,
    }],
    conflicts: &[],
    conflict_message: "Já existe uma cidade com este nome no estado selecionado",
    dependents: &[Dependent {
        table: "bairro",
        column: "id_cidade",
    }],
    in_use_message: "Não é possível excluir a cidade pois está sendo utilizada em bairros",
    checks: &[],
};

pub static NEIGHBOURHOOD: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Bairro",
        plural: "Bairros",
        feminine: false,
    },
    path: "/bairros",
    table: "bairro",
    key: "id_bairro",
    id_alias: "idBairro",
    fields: &[
        Field::new("nome", "nome", FieldKind::Text { min: 1, max: 100 }).required(),
        Field::new("idCidade", "id_cidade", FieldKind::Id)
            .required()
            .references(&CITY),
    ],
    required_message: "Nome e ID da cidade são campos obrigatórios",
    select: r#"SELECT b.id_bairro AS "idBairro", b.nome AS "nome", b.id_cidade AS "idCidade",
            c.nome AS "cidade", e.nome AS "estado", e.sigla AS "sigla"
        FROM bairro b
        JOIN cidade c ON c.id_cidade = b.id_cidade
        JOIN estado e ON e.id_estado = c.id_estado"#,
    order_by: &["nome"],
    filters: &[Filter {
        param: "cidadeId",
        alias: "idCidade",
        op: FilterOp::Id,
    }],
    conflicts: &[],
    conflict_message: "Já existe um bairro com este nome na cidade selecionada",
    dependents: &[Dependent {
        table: "logradouro",
        column: "id_bairro",
    }],
    in_use_message: "Não é possível excluir o bairro pois está sendo utilizado em logradouros",
    checks: &[],
};

pub static STREET: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Logradouro",
        plural: "Logradouros",
        feminine: false,
    },
    path: "/logradouros",
    table: "logradouro",
    key: "id_logradouro",
    id_alias: "idLogradouro",
    fields: &[
        Field::new("nome", "nome", FieldKind::Text { min: 1, max: 150 }).required(),
        Field::new("idBairro", "id_bairro", FieldKind::Id)
            .required()
            .references(&NEIGHBOURHOOD),
    ],
    required_message: "Nome e ID do bairro são campos obrigatórios",
    select: r#"SELECT l.id_logradouro AS "idLogradouro", l.nome AS "nome", l.id_bairro AS "idBairro",
            b.nome AS "bairro", c.nome AS "cidade", e.nome AS "estado", e.sigla AS "sigla"
        FROM logradouro l
        JOIN bairro b ON b.id_bairro = l.id_bairro
        JOIN cidade c ON c.id_cidade = b.id_cidade
        JOIN estado e ON e.id_estado = c.id_estado"#,
    order_by: &["nome"],
    filters: &[Filter {
        param: "bairroId",
        alias: "idBairro",
        op: FilterOp::Id,
    }],
    conflicts: &[],
    conflict_message: "Já existe um logradouro com este nome no bairro selecionado",
    dependents: &[
        Dependent {
            table: "cep",
            column: "id_logradouro",
        },
        Dependent {
            table: "endereco",
            column: "id_logradouro",
        },
    ],
    in_use_message:
        "Não é possível excluir o logradouro pois está sendo utilizado em CEPs ou Endereços",
    checks: &[],
};

pub static CEP: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "CEP",
        plural: "CEPs",
        feminine: false,
    },
    path: "/ceps",
    table: "cep",
    key: "id_cep",
    id_alias: "idCep",
    fields: &[
        Field::new("codigo", "codigo", FieldKind::PostalCode)
            .required()
            .hint("Formato do CEP inválido. Use o formato XXXXX-XXX"),
        Field::new("idLogradouro", "id_logradouro", FieldKind::Id)
            .required()
            .references(&STREET),
    ],
    required_message: "Código e ID do logradouro são campos obrigatórios",
    select: r#"SELECT cp.id_cep AS "idCep", cp.codigo AS "codigo", cp.id_logradouro AS "idLogradouro",
            l.nome AS "logradouro", b.nome AS "bairro", c.nome AS "cidade",
            e.nome AS "estado", e.sigla AS "sigla"
        FROM cep cp
        JOIN logradouro l ON l.id_logradouro = cp.id_logradouro
        JOIN bairro b ON b.id_bairro = l.id_bairro
        JOIN cidade c ON c.id_cidade = b.id_cidade
        JOIN estado e ON e.id_estado = c.id_estado"#,
    order_by: &["codigo"],
    filters: &[Filter {
        param: "logradouroId",
        alias: "idLogradouro",
        op: FilterOp::Id,
    }],
    conflicts: &[],
    conflict_message: "Já existe um CEP com este código",
    dependents: &[Dependent {
        table: "endereco",
        column: "id_cep",
    }],
    in_use_message: "Não é possível excluir o CEP pois está sendo utilizado em Endereços",
    checks: &[Consistency::KeepsDependents {
        field: "idLogradouro",
        mismatch: "SELECT 1 FROM endereco WHERE id_cep = $1 AND id_logradouro <> $2",
        message: "O CEP está vinculado a endereços de outro logradouro",
    }],
};

pub static ADDRESS: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Endereço",
        plural: "Endereços",
        feminine: false,
    },
    path: "/enderecos",
    table: "endereco",
    key: "id_endereco",
    id_alias: "idEndereco",
    fields: &[
        Field::new("idLogradouro", "id_logradouro", FieldKind::Id)
            .required()
            .references(&STREET),
        Field::new("numero", "numero", FieldKind::Count)
            .required()
            .hint("Número deve ser um valor numérico"),
        Field::new("complemento", "complemento", FieldKind::Text { min: 1, max: 100 }),
        Field::new("idCep", "id_cep", FieldKind::Id)
            .required()
            .references(&CEP),
    ],
    required_message: "Logradouro, número e CEP são campos obrigatórios",
    select: r#"SELECT en.id_endereco AS "idEndereco", en.numero AS "numero",
            en.complemento AS "complemento", en.id_logradouro AS "idLogradouro",
            en.id_cep AS "idCep", cp.codigo AS "cep", l.nome AS "logradouro",
            b.nome AS "bairro", c.id_cidade AS "idCidade", c.nome AS "cidade",
            e.nome AS "estado", e.sigla AS "sigla"
        FROM endereco en
        JOIN cep cp ON cp.id_cep = en.id_cep
        JOIN logradouro l ON l.id_logradouro = en.id_logradouro
        JOIN bairro b ON b.id_bairro = l.id_bairro
        JOIN cidade c ON c.id_cidade = b.id_cidade
        JOIN estado e ON e.id_estado = c.id_estado"#,
    order_by: &["logradouro", "numero"],
    filters: &[
        Filter {
            param: "logradouroId",
            alias: "idLogradouro",
            op: FilterOp::Id,
        },
        Filter {
            param: "cepId",
            alias: "idCep",
            op: FilterOp::Id,
        },
    ],
    conflicts: &[],
    conflict_message: "Já existe um endereço com este número no mesmo logradouro e CEP",
    dependents: &[
        Dependent {
            table: "hospedagem",
            column: "id_endereco",
        },
        Dependent {
            table: "usuario",
            column: "id_endereco",
        },
    ],
    in_use_message:
        "Não é possível excluir o endereço pois está sendo utilizado em hospedagens ou usuários",
    checks: &[Consistency::BelongsTo {
        child: "idCep",
        table: "cep",
        key: "id_cep",
        column: "id_logradouro",
        parent: "idLogradouro",
        message: "O CEP não pertence ao logradouro especificado",
    }],
};
