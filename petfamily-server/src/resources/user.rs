use crate::models::{Dependent, Field, FieldKind, Noun, ResourceSpec};

use super::address::ADDRESS;

/// `senha` is write-only: it is never part of the projection.
pub static USER: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Usuário",
        plural: "Usuários",
        feminine: false,
    },
    path: "/usuarios",
    table: "usuario",
    key: "id_usuario",
    id_alias: "idUsuario",
    fields: &[
        Field::new("nome", "nome", FieldKind::Text { min: 1, max: 150 }).required(),
        Field::new("cpf", "cpf", FieldKind::Cpf).required(),
        Field::new("email", "email", FieldKind::Email).required(),
        Field::new("telefone", "telefone", FieldKind::Phone),
        Field::new("senha", "senha", FieldKind::Secret { min: 6 }).required(),
        Field::new("ativado", "ativado", FieldKind::Flag),
        Field::new("desativado", "desativado", FieldKind::Flag),
        Field::new("esqueceuSenha", "esqueceu_senha", FieldKind::Flag),
        Field::new("idEndereco", "id_endereco", FieldKind::Id).references(&ADDRESS),
    ],
    required_message: "Nome, CPF, email e senha são campos obrigatórios",
    select: r#"SELECT u.id_usuario AS "idUsuario", u.nome AS "nome", u.cpf AS "cpf",
            u.email AS "email", u.telefone AS "telefone", u.ativado AS "ativado",
            u.desativado AS "desativado", u.esqueceu_senha AS "esqueceuSenha",
            u.data_cadastro AS "dataCadastro", u.id_endereco AS "idEndereco",
            c.id_cidade AS "idCidade", c.nome AS "cidade", e.nome AS "estado", e.sigla AS "sigla"
        FROM usuario u
        LEFT JOIN endereco en ON en.id_endereco = u.id_endereco
        LEFT JOIN logradouro l ON l.id_logradouro = en.id_logradouro
        LEFT JOIN bairro b ON b.id_bairro = l.id_bairro
        LEFT JOIN cidade c ON c.id_cidade = b.id_cidade
        LEFT JOIN estado e ON e.id_estado = c.id_estado"#,
    order_by: &["nome"],
    filters: &[],
    conflicts: &[
        ("cpf", "CPF já cadastrado"),
        ("email", "Email já cadastrado"),
    ],
    conflict_message: "CPF ou email já cadastrado",
    dependents: &[
        Dependent {
            table: "contrato",
            column: "id_usuario",
        },
        Dependent {
            table: "pet",
            column: "id_usuario",
        },
    ],
    in_use_message: "Não é possível excluir o usuário pois existem contratos ou pets vinculados a ele",
    checks: &[],
};
